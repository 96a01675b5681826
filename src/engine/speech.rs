// Text-to-speech dispatch through an ordered chain of providers.
//
// Speaking never blocks the caller: `Speaker::speak` hands the text to a
// background thread, and a newer request cancels whatever is still being
// spoken. Failures are logged and dropped.

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::narration::Language;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

// espeak-ng speaks about this many words per minute at rate 1.0
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech provider '{provider}' could not start: {reason}")]
    Start { provider: String, reason: String },

    #[error("Speech provider '{0}' exited with an error")]
    Failed(String),

    #[error("No speech provider is available")]
    Unavailable,

    #[error("Speech request was replaced by a newer one")]
    Superseded,

    #[error("Invalid speech provider template '{0}'")]
    InvalidTemplate(String),
}

/// One utterance in progress.
pub trait Utterance: Send {
    /// `None` while still speaking, `Some(success)` once finished
    fn poll(&mut self) -> Option<bool>;

    /// Stop speaking immediately
    fn cancel(&mut self);
}

/// Something that can turn text into sound.
pub trait SpeechProvider: Send + Sync {
    fn name(&self) -> &str;

    fn start(&self, text: &str, lang: Language) -> Result<Box<dyn Utterance>, SpeechError>;
}

/// Runs an external synthesizer such as `espeak-ng`, `spd-say` or `say`.
///
/// The template is split shell-style; `{text}`, `{lang}`, `{voice}`,
/// `{rate}` and `{wpm}` are substituted per utterance. Without a `{text}`
/// placeholder the text is appended as the last argument.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    name: String,
    program: String,
    args: Vec<String>,
    rate: f32,
}

impl CommandProvider {
    pub fn from_template(template: &str, rate: f32) -> Result<Self, SpeechError> {
        let invalid = || SpeechError::InvalidTemplate(template.to_string());
        let mut parts = shlex::split(template).ok_or_else(invalid)?.into_iter();
        let program = parts.next().ok_or_else(invalid)?;
        let name = std::path::Path::new(&program)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| program.clone());

        Ok(Self {
            name,
            program,
            args: parts.collect(),
            rate,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for one utterance
    pub fn render_args(&self, text: &str, lang: Language) -> Vec<String> {
        let wpm = (BASE_WORDS_PER_MINUTE * self.rate).round() as u32;
        let mut has_text = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                has_text |= arg.contains("{text}");
                arg.replace("{text}", text)
                    .replace("{lang}", lang.tag())
                    .replace("{voice}", lang.voice())
                    .replace("{rate}", &format!("{:.2}", self.rate))
                    .replace("{wpm}", &wpm.to_string())
            })
            .collect();
        if !has_text {
            args.push(text.to_string());
        }
        args
    }
}

struct ChildUtterance(Child);

impl Utterance for ChildUtterance {
    fn poll(&mut self) -> Option<bool> {
        match self.0.try_wait() {
            Ok(Some(status)) => Some(status.success()),
            Ok(None) => None,
            Err(_) => Some(false),
        }
    }

    fn cancel(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

impl SpeechProvider for CommandProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&self, text: &str, lang: Language) -> Result<Box<dyn Utterance>, SpeechError> {
        let child = Command::new(&self.program)
            .args(self.render_args(text, lang))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeechError::Start {
                provider: self.name.clone(),
                reason: e.to_string(),
            })?;
        Ok(Box::new(ChildUtterance(child)))
    }
}

/// An utterance that got past its provider's startup window
pub struct Started {
    pub provider: String,
    pub utterance: Box<dyn Utterance>,
}

/// Providers tried in order until one starts speaking.
///
/// A provider counts as working once it has been running for `timeout`
/// without failing, or finished successfully within it. Providers that
/// cannot spawn or exit with an error inside the window fall through to the
/// next one.
pub struct ProviderChain {
    providers: Vec<Box<dyn SpeechProvider>>,
    timeout: Duration,
}

impl ProviderChain {
    pub fn new(providers: Vec<Box<dyn SpeechProvider>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    /// Build command providers from templates, skipping malformed ones.
    pub fn from_templates(templates: &[String], rate: f32, timeout: Duration) -> Self {
        let providers = templates
            .iter()
            .filter_map(|t| match CommandProvider::from_template(t, rate) {
                Ok(p) => Some(Box::new(p) as Box<dyn SpeechProvider>),
                Err(e) => {
                    tracing::warn!("{e}");
                    None
                }
            })
            .collect();
        Self::new(providers, timeout)
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn start(&self, text: &str, lang: Language) -> Result<Started, SpeechError> {
        self.start_while(text, lang, || true)
    }

    /// Like `start`, but gives up as soon as `wanted` turns false: before
    /// each provider and on every poll of the startup window. An utterance
    /// already spawned is cancelled first.
    pub fn start_while(
        &self,
        text: &str,
        lang: Language,
        wanted: impl Fn() -> bool,
    ) -> Result<Started, SpeechError> {
        for provider in &self.providers {
            if !wanted() {
                return Err(SpeechError::Superseded);
            }
            let mut utterance = match provider.start(text, lang) {
                Ok(u) => u,
                Err(e) => {
                    tracing::warn!("{e}");
                    continue;
                }
            };

            let started = Instant::now();
            loop {
                if !wanted() {
                    utterance.cancel();
                    return Err(SpeechError::Superseded);
                }
                match utterance.poll() {
                    Some(false) => {
                        tracing::warn!("{}", SpeechError::Failed(provider.name().to_string()));
                        break;
                    }
                    Some(true) => {
                        return Ok(Started {
                            provider: provider.name().to_string(),
                            utterance,
                        });
                    }
                    None if started.elapsed() >= self.timeout => {
                        return Ok(Started {
                            provider: provider.name().to_string(),
                            utterance,
                        });
                    }
                    None => thread::sleep(POLL_INTERVAL),
                }
            }
        }
        Err(SpeechError::Unavailable)
    }
}

/// Fire-and-forget narration with replace-on-new semantics.
#[derive(Clone)]
pub struct Speaker {
    chain: Arc<ProviderChain>,
    current: Arc<Mutex<Option<Box<dyn Utterance>>>>,
    generation: Arc<AtomicU64>,
}

impl Speaker {
    pub fn new(chain: ProviderChain) -> Self {
        Self {
            chain: Arc::new(chain),
            current: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    /// Speak `text` in the background, cutting off anything still playing.
    pub fn speak(&self, text: &str, lang: Language) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let generation = self.interrupt();

        let chain = Arc::clone(&self.chain);
        let current = Arc::clone(&self.current);
        let latest = Arc::clone(&self.generation);
        let text = text.to_string();

        thread::spawn(move || {
            let wanted = || latest.load(Ordering::SeqCst) == generation;
            match chain.start_while(&text, lang, wanted) {
                Ok(mut started) => {
                    tracing::debug!(provider = %started.provider, %text, "speaking");
                    if let Ok(mut slot) = current.lock() {
                        if wanted() {
                            *slot = Some(started.utterance);
                        } else {
                            // A newer request arrived after the startup window
                            started.utterance.cancel();
                        }
                    }
                }
                Err(SpeechError::Superseded) => {
                    tracing::debug!(%text, "speech superseded while starting")
                }
                Err(e) => tracing::warn!(%text, "speech dropped: {e}"),
            }
        });
    }

    /// Speak and block until the utterance has finished.
    pub fn speak_and_wait(&self, text: &str, lang: Language) -> Result<String, SpeechError> {
        self.interrupt();
        let mut started = self.chain.start(text, lang)?;
        loop {
            match started.utterance.poll() {
                Some(true) => return Ok(started.provider),
                Some(false) => return Err(SpeechError::Failed(started.provider)),
                None => thread::sleep(POLL_INTERVAL),
            }
        }
    }

    /// Cancel anything currently being spoken.
    pub fn stop(&self) {
        self.interrupt();
    }

    fn interrupt(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut slot) = self.current.lock() {
            if let Some(mut utterance) = slot.take() {
                utterance.cancel();
            }
        }
        generation
    }
}
