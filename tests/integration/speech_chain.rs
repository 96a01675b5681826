// Provider chains built from command templates, exercised with the POSIX
// `true` and `false` utilities standing in for speech synthesizers.

use std::time::Duration;
use tidstreneren::engine::narration::Language;
use tidstreneren::engine::speech::{
    CommandProvider, ProviderChain, Speaker, SpeechError, SpeechProvider,
};

fn chain(templates: &[&str]) -> ProviderChain {
    let templates: Vec<String> = templates.iter().map(|t| t.to_string()).collect();
    ProviderChain::from_templates(&templates, 1.0, Duration::from_secs(2))
}

#[test]
fn test_templates_render_per_language() {
    let provider = CommandProvider::from_template("espeak-ng -v {voice} -s {wpm} {text}", 0.85).unwrap();
    assert_eq!(provider.name(), "espeak-ng");
    let args = provider.render_args("Klokka er tre", Language::Norwegian);
    assert_eq!(args[0], "-v");
    assert_eq!(args[2], "-s");
    assert_eq!(args[3], "149");
    assert_eq!(args[4], "Klokka er tre");

    // No placeholder: the text goes last
    let say = CommandProvider::from_template("/usr/bin/say", 1.0).unwrap();
    assert_eq!(say.name(), "say");
    assert_eq!(say.render_args("hello", Language::English), vec!["hello"]);
}

#[test]
fn test_malformed_templates_are_skipped() {
    let chain = chain(&["", "espeak-ng \"unterminated", "say {text}"]);
    assert_eq!(chain.names(), vec!["say"]);
}

#[cfg(unix)]
#[test]
fn test_chain_falls_through_to_working_provider() {
    let chain = chain(&["definitely-not-a-synthesizer {text}", "false {text}", "true {text}"]);
    let started = chain.start("hei", Language::Norwegian).unwrap();
    assert_eq!(started.provider, "true");
}

#[cfg(unix)]
#[test]
fn test_blocking_speech_reports_provider() {
    let speaker = Speaker::new(chain(&["false", "true"]));
    assert_eq!(speaker.speak_and_wait("hello", Language::English).unwrap(), "true");
}

#[cfg(unix)]
#[test]
fn test_all_providers_failing_is_unavailable() {
    let speaker = Speaker::new(chain(&["false", "definitely-not-a-synthesizer"]));
    let err = speaker.speak_and_wait("hello", Language::English).unwrap_err();
    assert!(matches!(err, SpeechError::Unavailable));
}

#[test]
fn test_empty_chain_never_blocks_fire_and_forget() {
    let speaker = Speaker::new(ProviderChain::new(Vec::new(), Duration::from_millis(10)));
    assert!(speaker.chain().is_empty());
    speaker.speak("hei", Language::Norwegian);
    speaker.stop();
}
