//! Example of using the unified API

use std::sync::Arc;

use typokit_core::{
    Config, CorrectionOptions, HyphenationOptions, Input, LanguageData, Markup, MemorySource, Mode,
    PatternRegistry, Typographer,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example 1: Simple usage with default configuration
    println!("=== Example 1: Simple Usage ===");
    let typographer = Typographer::new()?;
    let text = "\"Associate\" programs -- it's true... really!!";
    let output = typographer.process(Input::from_text(text))?;

    println!("Input text:  {}", text);
    println!("Output text: {}", output.text.replace('\u{AD}', "|"));

    // Example 2: Custom configuration
    println!("\n=== Example 2: Custom Configuration ===");
    let config = Config::builder()
        .language("en")
        .mode(Mode::Both)
        .hyphenation(
            HyphenationOptions::builder()
                .hyphen("-")
                .margins(2, 3)
                .min_word_length(5)
                .build()?,
        )
        .correction(CorrectionOptions::builder().paragraphs(true).build()?)
        .build()?;

    let custom = Typographer::with_config(config)?;
    let custom_output = custom.process(Input::from_text(
        "First paragraph about an associate.\n\nSecond \"one\".",
    ))?;

    println!("{}", custom_output.text);
    println!("Processing stats:");
    println!("  - Duration: {:?}", custom_output.metadata.duration);
    println!("  - HTML: {}", custom_output.metadata.is_html);
    println!("  - Words: {}", custom_output.metadata.stats.words);
    println!(
        "  - Hyphenated: {}",
        custom_output.metadata.stats.words_hyphenated
    );

    // Example 3: Own pattern data shared through a registry
    println!("\n=== Example 3: Custom Language Data ===");
    let data = LanguageData::new("xx")
        .with_tex_patterns(["hy1", "ph0"])
        .with_prepositions(["in"]);
    let registry = Arc::new(
        PatternRegistry::builder()
            .memory(MemorySource::new().with_language("xx", data))
            .embedded()
            .build(),
    );

    let shared = Typographer::builder()
        .registry(Arc::clone(&registry))
        .language("xx")
        .markup(Markup::Plain)
        .hyphenation(
            HyphenationOptions::builder()
                .hyphen("|")
                .bind_words(true)
                .nbsp("~")
                .build()?,
        )
        .build()?;

    println!("{}", shared.hyphenate("hyphens in <b>hyphens</b>", "xx")?);
    println!("Loaded languages: {:?}", registry.loaded_languages());

    // Example 4: Processing from file
    println!("\n=== Example 4: File Processing ===");
    let path = std::env::temp_dir().join("typokit_example.html");
    std::fs::write(&path, "<p>It's <em>\"done\"</em>...</p>\n<pre>'raw'</pre>\n")?;
    let file_output = typographer.process(Input::from_file(&path))?;
    println!("{}", file_output.text);
    std::fs::remove_file(&path)?;

    Ok(())
}
