use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("transeval_translate_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_corpus_lookup() {
    let t = ServiceTranslator::new(
        Service::new("bing"),
        TranslatorBackend::Corpus(CorpusTranslator::from_pairs(vec![
            ("The wind".to_string(), "El viento".to_string()),
            ("The trees".to_string(), "Los árboles".to_string()),
        ])),
    );
    assert_eq!(t.service().name(), "bing");
    assert_eq!(t.translate(" The wind ", "en", "es").unwrap(), "El viento");
    let err = t.translate("Unknown", "en", "es").unwrap_err();
    assert!(matches!(err, InputError::Translation { ref service, .. } if service == "bing"));
}

#[test]
fn test_build_translators_from_corpus_config() {
    let dir = make_temp_dir();
    let src = dir.join("sl.txt");
    let out = dir.join("bing.txt");
    std::fs::write(&src, "one\ntwo\n").unwrap();
    std::fs::write(&out, "uno\ndos\n").unwrap();
    let cfg = vec![ServiceConfig {
        name: "bing".to_string(),
        translator: TranslatorConfig::Corpus {
            source: src,
            output: out,
        },
    }];
    let translators = build_translators(&cfg).unwrap();
    assert_eq!(translators.len(), 1);
    assert_eq!(translators[0].translate("two", "en", "es").unwrap(), "dos");
}

#[test]
fn test_corpus_length_mismatch() {
    let dir = make_temp_dir();
    let src = dir.join("sl.txt");
    let out = dir.join("bing.txt");
    std::fs::write(&src, "one\ntwo\n").unwrap();
    std::fs::write(&out, "uno\n").unwrap();
    assert!(matches!(
        CorpusTranslator::load(&src, &out),
        Err(InputError::Parse(_))
    ));
}

#[cfg(unix)]
#[test]
fn test_command_translator_strips_unknown_marks() {
    let t = ServiceTranslator::new(
        Service::new("apertium"),
        TranslatorBackend::Command(CommandTranslator::new("cat".to_string(), vec![], true)),
    );
    assert_eq!(t.translate("el *viento\n", "en", "es").unwrap(), "el viento");
}

#[cfg(unix)]
#[test]
fn test_command_translator_failure() {
    let t = ServiceTranslator::new(
        Service::new("apertium"),
        TranslatorBackend::Command(CommandTranslator::new("false".to_string(), vec![], false)),
    );
    assert!(matches!(
        t.translate("x", "en", "es"),
        Err(InputError::Translation { .. })
    ));
}
