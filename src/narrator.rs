use crate::config::SpeechConfig;
use crate::error::NarrationError;
use std::process::{Child, Command, Stdio};

/// Reads card text aloud.
pub trait Narrator {
    /// Starts reading `text`, replacing whatever is currently being read.
    fn say(&mut self, text: &str) -> Result<(), NarrationError>;

    fn stop(&mut self);
}

#[derive(Debug, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn say(&mut self, _text: &str) -> Result<(), NarrationError> {
        Ok(())
    }

    fn stop(&mut self) {}
}

/// Narrates by running an external speech synthesizer such as `espeak-ng`.
#[derive(Debug)]
pub struct CommandNarrator {
    program: String,
    args: Vec<String>,
    end_of_options: bool,
    current: Option<Child>,
}

impl CommandNarrator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            end_of_options: true,
            current: None,
        }
    }

    /// Whether `--` goes between the configured args and the text.
    pub fn end_of_options(mut self, enabled: bool) -> Self {
        self.end_of_options = enabled;
        self
    }

    fn command(&self, text: &str) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if self.end_of_options {
            command.arg("--");
        }
        command.arg(text);
        command
    }
}

impl Narrator for CommandNarrator {
    fn say(&mut self, text: &str) -> Result<(), NarrationError> {
        self.stop();

        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let child = self
            .command(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| NarrationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        tracing::trace!(pid = child.id(), "narration started");
        self.current = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.current.take() {
            if matches!(child.try_wait(), Ok(None)) {
                let _ = child.kill();
            }
            // Reap so no zombie is left behind.
            let _ = child.wait();
        }
    }
}

impl Drop for CommandNarrator {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Builds the narrator described by the config.
pub fn from_config(config: &SpeechConfig, muted: bool) -> Box<dyn Narrator> {
    if muted || !config.enabled || config.command.trim().is_empty() {
        tracing::info!("narration disabled");
        Box::new(SilentNarrator)
    } else {
        tracing::info!(command = %config.command, "narration enabled");
        Box::new(
            CommandNarrator::new(config.command.clone(), config.args.clone())
                .end_of_options(config.end_of_options),
        )
    }
}

#[cfg(test)]
impl CommandNarrator {
    fn is_speaking(&mut self) -> bool {
        match self.current.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn wait_until_done(&mut self) {
        if let Some(mut child) = self.current.take() {
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_narrator() {
        let mut narrator = SilentNarrator;
        assert!(narrator.say("anything").is_ok());
        narrator.stop();
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let mut narrator = CommandNarrator::new("definitely-not-a-real-tts-program", vec![]);
        let result = narrator.say("hello");
        assert!(matches!(result, Err(NarrationError::Spawn { .. })));
        assert!(!narrator.is_speaking());
    }

    #[test]
    fn test_empty_text_is_not_spoken() {
        let mut narrator = CommandNarrator::new("definitely-not-a-real-tts-program", vec![]);
        assert!(narrator.say("   ").is_ok());
        assert!(!narrator.is_speaking());
    }

    #[cfg(unix)]
    #[test]
    fn test_new_utterance_replaces_previous() {
        let mut narrator = CommandNarrator::new("sleep", vec![]);
        narrator.say("5").unwrap();
        assert!(narrator.is_speaking());

        narrator.say("5").unwrap();
        assert!(narrator.is_speaking());

        narrator.stop();
        assert!(!narrator.is_speaking());
    }

    #[test]
    fn test_from_config_respects_mute() {
        let config = SpeechConfig::default();
        let mut narrator = from_config(&config, true);
        // A silent narrator never fails, even though espeak-ng may be absent.
        assert!(narrator.say("hello").is_ok());

        let disabled = SpeechConfig {
            enabled: false,
            ..SpeechConfig::default()
        };
        assert!(from_config(&disabled, false).say("hello").is_ok());
    }

    #[test]
    fn test_command_places_separator_before_text() {
        let narrator = CommandNarrator::new("espeak-ng", vec!["-v".to_string(), "en".to_string()]);
        let command = narrator.command("-1");
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args, vec!["-v", "en", "--", "-1"]);

        let narrator = CommandNarrator::new("say", vec![]).end_of_options(false);
        let command = narrator.command("-1");
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args, vec!["-1"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_text_starting_with_dash_reaches_getopt_program() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("spoken.txt");
        let program = dir.path().join("fake-tts");
        std::fs::write(
            &program,
            format!(
                "#!/bin/sh\nwhile getopts \"v:\" opt; do :; done\nshift $((OPTIND - 1))\nprintf '%s' \"$*\" > '{}'\n",
                out.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut narrator = CommandNarrator::new(
            program.to_string_lossy().to_string(),
            vec!["-v".to_string(), "en".to_string()],
        );
        narrator.say("-273 degrees Celsius").unwrap();
        narrator.wait_until_done();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "-273 degrees Celsius");
    }
}
