use std::process::Stdio;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::SpeechConfig;
use crate::kernel::event::OutputId;
use crate::kernel::language::VoiceProfile;

const BASE_WORDS_PER_MINUTE: f32 = 175.0;

struct Playback {
    id: OutputId,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Speaks through an external TTS command. A new request cancels whatever
/// is still playing.
pub struct SpeechChannel {
    program: Option<String>,
    voice_args: bool,
    current: Option<Playback>,
}

impl SpeechChannel {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            program: config.program.clone(),
            voice_args: config.voice_args,
            current: None,
        }
    }

    /// Command-line arguments for one utterance.
    pub fn arguments(&self, text: &str, voice: &VoiceProfile) -> Vec<String> {
        let mut args = Vec::new();
        if self.voice_args {
            args.push("-v".to_string());
            args.push(voice.locale.to_lowercase());
            args.push("-s".to_string());
            args.push(((BASE_WORDS_PER_MINUTE * voice.rate).round() as u32).to_string());
            args.push("-p".to_string());
            args.push(((50.0 * voice.pitch).round().min(99.0) as u32).to_string());
        }
        args.push(text.to_string());
        args
    }

    pub fn speak(&mut self, id: OutputId, text: &str, voice: &VoiceProfile) {
        self.cancel();

        let Some(program) = &self.program else {
            debug!("[SPEECH-{:?}] {} ({})", id, text, voice.locale);
            return;
        };
        if text.trim().is_empty() {
            return;
        }

        let spawned = Command::new(program)
            .args(self.arguments(text, voice))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        match spawned {
            Ok(mut child) => {
                let token = CancellationToken::new();
                let stop = token.clone();
                let handle = tokio::spawn(async move {
                    tokio::select! {
                        _ = child.wait() => {}
                        _ = stop.cancelled() => { let _ = child.kill().await; }
                    }
                });
                self.current = Some(Playback { id, token, handle });
            }
            Err(e) => warn!("Failed to spawn '{}': {}", program, e),
        }
    }

    /// Stops the in-flight utterance, if any.
    pub fn cancel(&mut self) {
        if let Some(playback) = self.current.take() {
            if !playback.handle.is_finished() {
                debug!("Superseding speech {:?}", playback.id);
            }
            playback.token.cancel();
        }
    }

    /// Waits for the in-flight utterance to play out.
    pub async fn finish(&mut self) {
        if let Some(playback) = self.current.take() {
            let _ = playback.handle.await;
        }
    }
}
