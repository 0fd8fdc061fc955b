use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::{ServiceConfig, TranslatorConfig};
use crate::input::{InputError, read_lines};
use crate::model::Service;

/// Capability of one configured translation service.
pub trait Translator {
    fn service(&self) -> &Service;
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str)
    -> Result<String, InputError>;
}

#[derive(Debug, Clone)]
pub enum TranslatorBackend {
    Command(CommandTranslator),
    Corpus(CorpusTranslator),
}

#[derive(Debug, Clone)]
pub struct ServiceTranslator {
    service: Service,
    backend: TranslatorBackend,
}

impl ServiceTranslator {
    pub fn new(service: Service, backend: TranslatorBackend) -> ServiceTranslator {
        ServiceTranslator { service, backend }
    }
}

impl Translator for ServiceTranslator {
    fn service(&self) -> &Service {
        &self.service
    }

    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, InputError> {
        let result = match &self.backend {
            TranslatorBackend::Command(cmd) => cmd.run(text, source_lang, target_lang),
            TranslatorBackend::Corpus(corpus) => corpus.lookup(text),
        };
        result.map_err(|reason| InputError::Translation {
            service: self.service.name().to_string(),
            reason,
        })
    }
}

/// Local MT engine driven through stdin/stdout (e.g. `apertium en-es`).
/// `{sl}` and `{tl}` in the arguments are replaced by the language codes.
#[derive(Debug, Clone)]
pub struct CommandTranslator {
    program: String,
    args: Vec<String>,
    strip_unknown_marks: bool,
}

impl CommandTranslator {
    pub fn new(program: String, args: Vec<String>, strip_unknown_marks: bool) -> CommandTranslator {
        CommandTranslator {
            program,
            args,
            strip_unknown_marks,
        }
    }

    fn run(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String, String> {
        let args = self
            .args
            .iter()
            .map(|a| a.replace("{sl}", source_lang).replace("{tl}", target_lang))
            .collect::<Vec<_>>();

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("cannot start {}: {e}", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| format!("cannot write to {}: {e}", self.program))?;
        }
        let output = child
            .wait_with_output()
            .map_err(|e| format!("{} did not finish: {e}", self.program))?;
        if !output.status.success() {
            return Err(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        let translated = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if translated.is_empty() {
            return Err(format!("{} produced no output", self.program));
        }
        Ok(self.clean(&translated))
    }

    fn clean(&self, translated: &str) -> String {
        if self.strip_unknown_marks {
            translated.replace('*', "")
        } else {
            translated.to_string()
        }
    }
}

/// Translations produced ahead of time: a source file and the service's
/// line-aligned output.
#[derive(Debug, Clone, Default)]
pub struct CorpusTranslator {
    entries: HashMap<String, String>,
}

impl CorpusTranslator {
    pub fn load(source: &Path, output: &Path) -> Result<CorpusTranslator, InputError> {
        let sources = read_lines(source)?;
        let outputs = read_lines(output)?;
        if sources.len() != outputs.len() {
            return Err(InputError::Parse(format!(
                "corpus {} has {} lines but {} has {}",
                source.display(),
                sources.len(),
                output.display(),
                outputs.len()
            )));
        }
        Ok(CorpusTranslator::from_pairs(sources.into_iter().zip(outputs)))
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> CorpusTranslator {
        let mut entries = HashMap::new();
        for (source, output) in pairs {
            entries.entry(source.trim().to_string()).or_insert(output);
        }
        CorpusTranslator { entries }
    }

    fn lookup(&self, text: &str) -> Result<String, String> {
        self.entries
            .get(text.trim())
            .cloned()
            .ok_or_else(|| format!("no precomputed translation for {text:?}"))
    }
}

pub fn build_translators(services: &[ServiceConfig]) -> Result<Vec<ServiceTranslator>, InputError> {
    let mut out = Vec::with_capacity(services.len());
    for cfg in services {
        let backend = match &cfg.translator {
            TranslatorConfig::Command {
                program,
                args,
                strip_unknown_marks,
            } => TranslatorBackend::Command(CommandTranslator::new(
                program.clone(),
                args.clone(),
                *strip_unknown_marks,
            )),
            TranslatorConfig::Corpus { source, output } => {
                TranslatorBackend::Corpus(CorpusTranslator::load(source, output)?)
            }
        };
        out.push(ServiceTranslator::new(Service::new(cfg.name.clone()), backend));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/translate.rs"]
mod tests;
