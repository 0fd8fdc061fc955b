use super::*;
use crate::input::translate::{CorpusTranslator, ServiceTranslator, TranslatorBackend};
use crate::model::Service;

fn corpus(service: &str, pairs: &[(&str, &str)]) -> ServiceTranslator {
    ServiceTranslator::new(
        Service::new(service),
        TranslatorBackend::Corpus(CorpusTranslator::from_pairs(
            pairs.iter().map(|(s, t)| (s.to_string(), t.to_string())),
        )),
    )
}

fn pair(source: &str, reference: &str) -> SentencePair {
    SentencePair {
        source: source.to_string(),
        reference: reference.to_string(),
    }
}

#[test]
fn test_documents_carry_every_translation() {
    let translators = vec![
        corpus("apertium", &[("Hello", "Hola"), ("Bye", "Adiós")]),
        corpus("bing", &[("Hello", "Buenas"), ("Bye", "Chao")]),
    ];
    let out = run_stage2(
        &[pair("Hello", "Hola"), pair("Bye", "Adiós")],
        &translators,
        "en",
        "es",
    );
    assert!(out.skipped.is_empty());
    assert_eq!(out.documents.len(), 2);
    let doc = &out.documents[1];
    assert_eq!(doc["lo"], "Bye");
    assert_eq!(doc["tr"], "Adiós");
    assert_eq!(doc["apertium"], "Adiós");
    assert_eq!(doc["bing"], "Chao");
}

#[test]
fn test_failed_translation_skips_sentence() {
    let translators = vec![
        corpus("apertium", &[("Hello", "Hola"), ("Bye", "Adiós")]),
        corpus("bing", &[("Hello", "Buenas")]),
    ];
    let out = run_stage2(
        &[pair("Hello", "Hola"), pair("Bye", "Adiós")],
        &translators,
        "en",
        "es",
    );
    assert_eq!(out.documents.len(), 1);
    assert_eq!(out.skipped.len(), 1);
    assert_eq!(out.skipped[0].line, 2);
    assert!(out.skipped[0].reason.contains("bing"));
}
