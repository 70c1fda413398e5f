//! End-to-end analyzer scenarios on the built-in lexicon engine.

use std::fs;

use morphkit::analysis::{Candidate, MatchOptions, PosTag, Token};
use morphkit::analyzer::Analyzer;
use morphkit::config::{AnalyzeOptions, AnalyzerConfig, EngineTunables, ExtractParams};
use morphkit::error::Result;
use morphkit::lexicon::LexiconBuilder;
use serde_json::json;
use tempfile::TempDir;

fn analyzer() -> Analyzer {
    let _ = env_logger::builder().is_test(true).try_init();
    Analyzer::with_builder(LexiconBuilder::empty(2), EngineTunables::default())
}

fn spans(candidate: &Candidate) -> Vec<(&str, PosTag, u32, u32)> {
    candidate
        .tokens
        .iter()
        .map(|t| (t.form.as_str(), t.tag, t.start, t.len))
        .collect()
}

fn assert_spans_match_text(text: &str, tokens: &[Token]) {
    let chars: Vec<char> = text.chars().collect();
    for token in tokens {
        let covered: String = chars[token.start as usize..token.end() as usize]
            .iter()
            .collect();
        assert_eq!(covered, token.form, "token {token} does not match the text");
    }
}

fn corpus() -> Vec<&'static str> {
    let mut lines = Vec::new();
    for _ in 0..5 {
        lines.push("감기약을 먹었다");
        lines.push("");
        lines.push("감기약이 좋다");
        lines.push("감기약은 좋다");
    }
    lines
}

#[test]
fn test_user_word_end_to_end() -> Result<()> {
    let mut analyzer = analyzer();
    assert!(analyzer.add_user_word("감기약", "NNP", 0.0)?);

    let result = analyzer.analyze("감기약을 먹었다", &AnalyzeOptions::default())?;
    assert_eq!(result.len(), 1);
    assert_eq!(
        spans(&result[0]),
        vec![
            ("감기약", PosTag::NNP, 0, 3),
            ("을", PosTag::JKO, 3, 1),
            ("먹", PosTag::VV, 5, 1),
            ("었", PosTag::EP, 6, 1),
            ("다", PosTag::EF, 7, 1),
        ]
    );
    assert_eq!(
        result[0].to_tagged_string(),
        "감기약/NNP + 을/JKO + 먹/VV + 었/EP + 다/EF"
    );
    Ok(())
}

#[test]
fn test_rebuild_only_after_change() -> Result<()> {
    let mut analyzer = analyzer();
    let options = AnalyzeOptions::default();

    analyzer.analyze("좋다", &options)?;
    analyzer.analyze("좋다", &options)?;
    assert_eq!(analyzer.build_count(), 1);

    assert!(analyzer.add_user_word("감기약", "NNP", 0.0)?);
    assert!(!analyzer.is_built());
    analyzer.analyze("감기약", &options)?;
    assert_eq!(analyzer.build_count(), 2);

    assert!(!analyzer.add_user_word("감기약", "NNP", 0.0)?);
    assert!(analyzer.is_built());
    analyzer.analyze("감기약", &options)?;
    assert_eq!(analyzer.build_count(), 2);

    assert!(analyzer.add_user_word("감기약", "XYZ", 0.0).is_err());
    assert!(analyzer.is_built());
    Ok(())
}

#[test]
fn test_offsets_with_non_bmp_characters() -> Result<()> {
    let mut analyzer = analyzer();
    analyzer.add_user_word("감기약", "NNP", 0.0)?;

    let result = analyzer.analyze("😀😀 감기약", &AnalyzeOptions::default())?;
    assert_eq!(
        spans(&result[0]),
        vec![("😀😀", PosTag::SW, 0, 2), ("감기약", PosTag::NNP, 3, 3)]
    );

    let text = "감기약😀을 먹었다 🎉! 𝒜𝒷𝒸 좋다";
    for candidate in analyzer.analyze(text, &AnalyzeOptions::new(5))? {
        assert_spans_match_text(text, &candidate.tokens);
    }
    Ok(())
}

#[test]
fn test_truncation_to_top_n() -> Result<()> {
    let mut analyzer = analyzer();
    let text = "사과를 먹었다";

    let one = analyzer.analyze(text, &AnalyzeOptions::new(1))?;
    let three = analyzer.analyze(text, &AnalyzeOptions::new(3))?;
    assert_eq!(one.len(), 1);
    assert_eq!(three.len(), 3);
    assert_eq!(one[0], three[0]);
    assert!(three.windows(2).all(|w| w[0].score >= w[1].score));
    Ok(())
}

#[test]
fn test_cutoff_threshold_limits_candidates() -> Result<()> {
    let mut analyzer = analyzer();
    let options = AnalyzeOptions::new(10);
    let wide = analyzer.analyze("사과를 먹었다", &options)?;

    analyzer.set_cutoff_threshold(0.0);
    let narrow = analyzer.analyze("사과를 먹었다", &options)?;
    assert!(narrow.len() < wide.len());
    assert_eq!(analyzer.build_count(), 1);
    Ok(())
}

#[test]
fn test_allomorph_ids() -> Result<()> {
    let mut analyzer = analyzer();
    let options = AnalyzeOptions::default();

    let result = analyzer.analyze("사과를 먹었다", &options)?;
    let reul = result[0].find("를").map(|t| t.id).unwrap();
    assert_eq!(analyzer.morpheme(reul)?.form, "을");

    analyzer.set_integrate_allomorph(false);
    let result = analyzer.analyze("사과를 먹었다", &options)?;
    let reul = result[0].find("를").map(|t| t.id).unwrap();
    assert_eq!(analyzer.morpheme(reul)?.form, "를");
    assert_eq!(analyzer.build_count(), 1);
    Ok(())
}

#[test]
fn test_morpheme_lookup() -> Result<()> {
    let mut analyzer = analyzer();
    analyzer.add_user_word("감기약", "NNP", 0.0)?;

    let result = analyzer.analyze("감기약", &AnalyzeOptions::default())?;
    let id = result[0].tokens[0].id;
    let token = analyzer.morpheme(id)?;
    assert_eq!(token.form, "감기약");
    assert_eq!(token.tag, PosTag::NNP);
    assert_eq!(token.id, id);

    assert!(analyzer.morpheme(1_000_000).unwrap_err().is_not_found());
    Ok(())
}

#[test]
fn test_match_options() -> Result<()> {
    let mut analyzer = analyzer();
    let text = "문의는 help@example.com 입니다";

    let result = analyzer.analyze(text, &AnalyzeOptions::default())?;
    let email = result[0].find("help@example.com").unwrap();
    assert_eq!((email.tag, email.start, email.len), (PosTag::W_EMAIL, 4, 16));

    let options = AnalyzeOptions::default().with_match_options(MatchOptions::empty());
    let result = analyzer.analyze(text, &options)?;
    assert!(result[0].tokens.iter().all(|t| t.tag != PosTag::W_EMAIL));
    Ok(())
}

#[test]
fn test_analyze_many_matches_analyze() -> Result<()> {
    let mut analyzer = analyzer();
    analyzer.add_user_word("감기약", "NNP", 0.0)?;
    let texts = ["감기약을 먹었다", "", "😀 좋다", "사과를 먹었다"];
    let options = AnalyzeOptions::new(2);

    let expected: Vec<Vec<Candidate>> = texts
        .iter()
        .map(|t| analyzer.analyze(t, &options))
        .collect::<Result<_>>()?;
    let streamed: Vec<Vec<Candidate>> = analyzer
        .analyze_many(texts, &options)?
        .collect::<Result<_>>()?;
    assert_eq!(streamed, expected);
    assert_eq!(analyzer.build_count(), 1);
    Ok(())
}

#[test]
fn test_user_dictionary_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("user.dict");
    fs::write(&path, "# medicines\n감기약\tNNP\n진통제\tNNG\t-1.0\n")?;

    let mut analyzer = analyzer();
    analyzer.analyze("감기약", &AnalyzeOptions::default())?;

    assert!(analyzer.load_user_dictionary(&path)?);
    assert!(!analyzer.is_built());
    let result = analyzer.analyze("진통제를 먹었다", &AnalyzeOptions::default())?;
    assert_eq!(result[0].tokens[0].form, "진통제");
    assert_eq!(result[0].tokens[0].tag, PosTag::NNG);

    assert!(!analyzer.load_user_dictionary(&path)?);
    assert!(analyzer.is_built());

    let bad = dir.path().join("bad.dict");
    fs::write(&bad, "두통약\tNNP\n해열제\tNOPE\n")?;
    assert!(analyzer.load_user_dictionary(&bad).is_err());
    assert!(analyzer.is_built());
    assert_eq!(analyzer.build_count(), 2);
    Ok(())
}

#[test]
fn test_model_directory() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("default.dict"), "감기약\tNNP\n")?;

    let _ = env_logger::builder().is_test(true).try_init();
    let config = AnalyzerConfig::new()
        .with_num_workers(2)
        .with_model_path(dir.path());
    let mut analyzer = Analyzer::new(config)?;
    assert_eq!(analyzer.num_workers()?, 2);
    assert!(!analyzer.add_user_word("감기약", "NNP", 0.0)?);

    let result = analyzer.analyze("감기약을", &AnalyzeOptions::default())?;
    assert_eq!(spans(&result[0])[0], ("감기약", PosTag::NNP, 0, 3));
    Ok(())
}

#[test]
fn test_word_extraction() -> Result<()> {
    let mut analyzer = analyzer();
    let params = ExtractParams::default().with_min_count(5);

    let found = analyzer.extract_words(corpus(), &params)?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].form, "감기약");
    assert_eq!(analyzer.build_count(), 0);

    analyzer.analyze("좋다", &AnalyzeOptions::default())?;
    let added = analyzer.extract_add_words(corpus(), &params)?;
    assert_eq!(added, found);
    assert!(!analyzer.is_built());

    let result = analyzer.analyze("감기약을 먹었다", &AnalyzeOptions::default())?;
    assert_eq!(spans(&result[0])[0], ("감기약", PosTag::NNP, 0, 3));

    assert!(analyzer.extract_add_words(corpus(), &params)?.is_empty());
    assert!(analyzer.is_built());
    Ok(())
}

#[test]
fn test_extraction_rejects_non_text_lines() {
    let analyzer = analyzer();
    let lines = vec![json!("감기약을 먹었다"), json!(42)];
    let err = analyzer
        .extract_words(lines, &ExtractParams::default())
        .unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn test_analyze_many_rejects_non_text_up_front() {
    let mut analyzer = analyzer();
    let texts = vec![json!("좋다"), json!(3)];
    let err = analyzer
        .analyze_many(texts, &AnalyzeOptions::default())
        .err()
        .unwrap();
    assert!(err.is_type_mismatch());
}
