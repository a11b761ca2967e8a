//! CLI tool for converting slide decks and PDFs to OCR'd DOCX documents.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deckdoc_core::{DocumentWriter, Error, OcrEngine, OutputDocument};
use deckdoc_docx::DocxWriter;
use deckdoc_ocr::TesseractEngine;
use deckdoc_pdf::PdfAssembler;
use deckdoc_pptx::{DeckAssembler, Package};

/// Convert PPTX slide decks and PDFs into text-searchable DOCX documents.
#[derive(Parser, Debug)]
#[command(name = "deckdoc")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Directory holding input files
    #[arg(long, default_value = "input")]
    input: PathBuf,

    /// Directory receiving converted documents
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Tesseract language profile
    #[arg(long, default_value = deckdoc_ocr::DEFAULT_LANGUAGE)]
    lang: String,

    /// Location of the tesseract binary (default: from PATH)
    #[arg(long)]
    tesseract: Option<PathBuf>,

    /// Rendering resolution for PDF pages
    #[arg(long, default_value_t = deckdoc_pdf::DEFAULT_DPI)]
    dpi: u32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one file from the input directory (.pptx assumed when the
    /// name carries no extension)
    Convert {
        /// File name inside the input directory
        file: String,
    },
    /// Convert every .pptx and .pdf file in a sub-directory of the input
    /// directory
    Batch {
        /// Sub-directory name inside the input directory
        directory: String,
    },
}

/// Outcome of one package in a batch run.
#[derive(Debug)]
struct BatchOutcome {
    input: String,
    result: std::result::Result<String, String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let mut engine = TesseractEngine::new().with_language(&args.lang);
    if let Some(binary) = &args.tesseract {
        engine = engine.with_binary(binary);
    }
    // A bad engine setup would fail every image in every package, so it
    // aborts the whole run before any conversion starts.
    engine
        .check_available()
        .context("OCR engine is not usable")?;

    let writer = DocxWriter::new();

    match &args.command {
        Command::Convert { file } => {
            let file = with_default_extension(file);
            std::fs::create_dir_all(&args.output)
                .with_context(|| format!("Failed to create {}", args.output.display()))?;

            let output_name = convert_one(
                &args.input.join(&file),
                &args.output,
                &engine,
                &writer,
                args.dpi,
            )
            .with_context(|| format!("Failed to convert {}", file))?;
            println!("Converted {} -> {}", file, output_name);
        }
        Command::Batch { directory } => {
            let outcomes = convert_directory(
                &args.input.join(directory),
                &args.output.join(directory),
                &engine,
                &writer,
                args.dpi,
            )?;
            print_batch_report(&outcomes);
        }
    }

    Ok(())
}

/// Convert a single file, writing the result into `output_dir`.
///
/// Returns the produced file name. Dispatches on extension: `.pdf` goes
/// through the page pipeline, everything else through the deck pipeline.
fn convert_one(
    source: &Path,
    output_dir: &Path,
    ocr: &dyn OcrEngine,
    writer: &dyn DocumentWriter,
    dpi: u32,
) -> deckdoc_core::Result<String> {
    let document = assemble(source, ocr, dpi)?;
    let output_name = output_file_name(source);
    writer.write(&document, &output_dir.join(&output_name))?;
    Ok(output_name)
}

/// Assemble the output document for one source file.
fn assemble(source: &Path, ocr: &dyn OcrEngine, dpi: u32) -> deckdoc_core::Result<OutputDocument> {
    if extension_of(source).eq_ignore_ascii_case("pdf") {
        PdfAssembler::new(ocr).with_dpi(dpi).assemble(source)
    } else {
        // The scratch area lives only as long as `package`; it is removed
        // when this function returns, on success and on failure alike.
        let package = Package::extract(source)?;
        DeckAssembler::new(ocr).assemble(&package)
    }
}

/// Convert every eligible file in `source_dir`, collecting per-file
/// outcomes.
///
/// A failed package is recorded and the batch continues; only an OCR
/// engine failure aborts, since every remaining file would fail the same
/// way.
fn convert_directory(
    source_dir: &Path,
    output_dir: &Path,
    ocr: &dyn OcrEngine,
    writer: &dyn DocumentWriter,
    dpi: u32,
) -> Result<Vec<BatchOutcome>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut files: Vec<PathBuf> = std::fs::read_dir(source_dir)
        .with_context(|| format!("Failed to read {}", source_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_eligible(path))
        .collect();
    files.sort();

    let mut outcomes = Vec::with_capacity(files.len());
    for file in &files {
        let input = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        log::info!("converting {}", input);

        match convert_one(file, output_dir, ocr, writer, dpi) {
            Ok(output_name) => outcomes.push(BatchOutcome {
                input,
                result: Ok(output_name),
            }),
            Err(e @ Error::OcrEngine(_)) => {
                return Err(e).context("OCR engine failed; aborting batch");
            }
            Err(e) => {
                log::warn!("conversion of {} failed: {}", input, e);
                outcomes.push(BatchOutcome {
                    input,
                    result: Err(e.to_string()),
                });
            }
        }
    }

    Ok(outcomes)
}

/// Print the per-package batch report.
fn print_batch_report(outcomes: &[BatchOutcome]) {
    let converted = outcomes.iter().filter(|o| o.result.is_ok()).count();
    println!("Converted {} of {} file(s):", converted, outcomes.len());
    for (index, outcome) in outcomes.iter().enumerate() {
        match &outcome.result {
            Ok(output_name) => println!("{}\t| {}\t| {}", index, outcome.input, output_name),
            Err(reason) => println!("{}\t| {}\t| FAILED: {}", index, outcome.input, reason),
        }
    }
}

/// Append the default `.pptx` extension when the name carries none.
fn with_default_extension(file: &str) -> String {
    if Path::new(file).extension().is_some() {
        file.to_string()
    } else {
        format!("{}.pptx", file)
    }
}

/// Lowercased extension of a path, empty when absent.
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Whether a file takes part in a batch run.
fn is_eligible(path: &Path) -> bool {
    matches!(extension_of(path).as_str(), "pptx" | "pdf")
}

/// Output file name: input name with its extension replaced by `.docx`.
fn output_file_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    format!("{}.docx", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::FileOptions;

    struct FakeOcr;

    impl OcrEngine for FakeOcr {
        fn extract_text(&self, _image: &Path) -> deckdoc_core::Result<String> {
            Ok(String::new())
        }
    }

    fn write_pptx(dest: &Path, entries: &[(&str, &str)]) {
        let mut writer = zip::ZipWriter::new(File::create(dest).unwrap());
        for (name, content) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    const SLIDE_XML: &str = r#"<p:sld xmlns:p="x" xmlns:a="y">
        <p:txBody><a:p><a:r><a:t>hello</a:t></a:r></a:p></p:txBody>
    </p:sld>"#;

    #[test]
    fn test_with_default_extension() {
        assert_eq!(with_default_extension("deck"), "deck.pptx");
        assert_eq!(with_default_extension("deck.pptx"), "deck.pptx");
        assert_eq!(with_default_extension("paper.pdf"), "paper.pdf");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(Path::new("in/deck.pptx")), "deck.docx");
        assert_eq!(output_file_name(Path::new("paper.pdf")), "paper.docx");
    }

    #[test]
    fn test_is_eligible() {
        assert!(is_eligible(Path::new("a/deck.pptx")));
        assert!(is_eligible(Path::new("a/paper.PDF")));
        assert!(!is_eligible(Path::new("a/notes.txt")));
        assert!(!is_eligible(Path::new("a/noext")));
    }

    #[test]
    fn batch_reports_success_and_failure_and_keeps_going() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_pptx(
            &input.path().join("bad.pptx"),
            // slide2.xml exists, slide1.xml does not: missing required part.
            &[("ppt/slides/slide2.xml", SLIDE_XML)],
        );
        write_pptx(
            &input.path().join("good.pptx"),
            &[("ppt/slides/slide1.xml", SLIDE_XML)],
        );

        let outcomes = convert_directory(
            input.path(),
            output.path(),
            &FakeOcr,
            &DocxWriter::new(),
            deckdoc_pdf::DEFAULT_DPI,
        )
        .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].input, "bad.pptx");
        assert!(outcomes[0].result.is_err());
        assert_eq!(outcomes[1].result.as_deref(), Ok("good.docx"));
        assert!(output.path().join("good.docx").is_file());
    }

    #[test]
    fn batch_ignores_non_matching_files() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        std::fs::write(input.path().join("notes.txt"), "not a deck").unwrap();

        let outcomes = convert_directory(
            input.path(),
            output.path(),
            &FakeOcr,
            &DocxWriter::new(),
            deckdoc_pdf::DEFAULT_DPI,
        )
        .unwrap();
        assert!(outcomes.is_empty());
    }
}
