//! # Formpress CLI
//!
//! Usage:
//!   formpress render form.json --values values.json --style classic -o out.pdf
//!   formpress inspect form.json --values values.json > pages.json
//!   formpress check form.json --values values.json
//!   formpress example > form.json
//!   formpress example --values > values.json
//!
//! Set `RUST_LOG=debug` to trace visibility decisions and page breaks.

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use formpress::pdf::PdfWriter;
use formpress::visibility::{lint_conditions, validate};
use formpress::{
    evaluate, parse_form, parse_submission, FormDefinition, PageSize, Renderer, StyleName,
    Submission,
};

#[derive(Parser)]
#[command(name = "formpress")]
#[command(version)]
#[command(about = "Render form templates and their submissions to paginated documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a form and its values to PDF
    Render {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Output file
        #[arg(short, long, default_value = "output.pdf")]
        output: PathBuf,
    },
    /// Print the page instructions as JSON
    Inspect {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Lint conditions and validate the submitted values
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print an example form (or, with --values, example values for it)
    Example {
        #[arg(long)]
        values: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Form definition JSON. Reads stdin when omitted.
    form: Option<PathBuf>,

    /// Submitted values JSON (object of field id to value)
    #[arg(long)]
    values: Option<PathBuf>,
}

#[derive(Args)]
struct LayoutArgs {
    /// modern, classic or minimal
    #[arg(short, long, default_value = "modern")]
    style: String,

    /// A4, Letter or Legal
    #[arg(long)]
    page_size: Option<PageSize>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, Box<dyn Error>> {
    match command {
        Command::Render {
            input,
            layout,
            output,
        } => {
            let (form, submission) = input.load()?;
            let renderer = layout.renderer()?;
            let pages = renderer.render(&form, &submission, &evaluate(&form, &submission));
            let pdf_bytes = PdfWriter::new().write(&pages, &form.settings)?;
            fs::write(&output, &pdf_bytes)?;
            eprintln!(
                "✓ Written {} pages ({} bytes) to {}",
                pages.len(),
                pdf_bytes.len(),
                output.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Inspect { input, layout } => {
            let (form, submission) = input.load()?;
            let renderer = layout.renderer()?;
            let pages = renderer.render(&form, &submission, &evaluate(&form, &submission));
            println!("{}", serde_json::to_string_pretty(&pages)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { input } => {
            let (form, submission) = input.load()?;
            let visibility = evaluate(&form, &submission);
            let condition_issues = lint_conditions(&form);
            let value_issues = validate(&form, &submission, &visibility);

            for issue in &condition_issues {
                println!("condition: {}", issue);
            }
            for issue in &value_issues {
                println!("value: {}", issue);
            }
            let hidden = visibility.hidden().count();
            eprintln!(
                "{} fields ({} hidden), {} condition issue(s), {} value issue(s)",
                visibility.len(),
                hidden,
                condition_issues.len(),
                value_issues.len()
            );

            if condition_issues.is_empty() && value_issues.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Example { values } => {
            if values {
                print!("{}", EXAMPLE_VALUES_JSON);
            } else {
                print!("{}", EXAMPLE_FORM_JSON);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

impl InputArgs {
    fn load(&self) -> Result<(FormDefinition, Submission), Box<dyn Error>> {
        let form_json = match &self.form {
            Some(path) => read(path)?,
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        let form = parse_form(&form_json)?;
        let submission = match &self.values {
            Some(path) => parse_submission(&read(path)?)?,
            None => Submission::new(),
        };
        Ok((form, submission))
    }
}

impl LayoutArgs {
    fn renderer(&self) -> Result<Renderer, Box<dyn Error>> {
        let name: StyleName = self.style.parse()?;
        let mut config = name.config();
        if let Some(size) = self.page_size {
            config.page_size = size;
        }
        Ok(Renderer::with_config(config)?)
    }
}

fn read(path: &Path) -> Result<String, Box<dyn Error>> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e).into())
}

const EXAMPLE_FORM_JSON: &str = r##"{
  "settings": {
    "title": "Contractor Onboarding",
    "subtitle": "Engagement details and compliance",
    "date": "March 4, 2026",
    "footer": "Generated with Formpress"
  },
  "rows": [
    {
      "id": "row-intro",
      "columnCount": 1,
      "fields": [
        { "id": "intro-heading", "type": "heading1", "content": "Contractor details" },
        {
          "id": "intro-text",
          "type": "paragraph",
          "content": "Complete every section. Fields that do not apply to your engagement are left out of the final document."
        }
      ]
    },
    {
      "id": "row-name",
      "columnCount": 2,
      "fields": [
        { "id": "full-name", "type": "text", "label": "Full name", "required": true },
        { "id": "email", "type": "email", "label": "Email", "required": true }
      ]
    },
    {
      "id": "row-engagement",
      "columnCount": 3,
      "fields": [
        {
          "id": "engagement",
          "type": "select",
          "label": "Engagement type",
          "required": true,
          "options": ["Hourly", "Fixed fee", "Retainer"]
        },
        {
          "id": "hourly-rate",
          "type": "number",
          "label": "Hourly rate (EUR)",
          "conditions": [
            {
              "action": "show",
              "logic": "all",
              "rules": [{ "fieldId": "engagement", "operator": "equals", "value": "Hourly" }]
            },
            {
              "action": "hide",
              "logic": "all",
              "rules": [{ "fieldId": "engagement", "operator": "not_equals", "value": "Hourly" }]
            }
          ]
        },
        { "id": "start-date", "type": "date", "label": "Start date" }
      ]
    },
    {
      "id": "row-compliance",
      "columnCount": 1,
      "fields": [
        { "type": "divider", "id": "divider-1" },
        { "id": "compliance-heading", "type": "heading2", "content": "Compliance" },
        { "id": "has-insurance", "type": "checkbox", "label": "Holds professional liability insurance" },
        {
          "id": "insurer",
          "type": "text",
          "label": "Insurer and policy number",
          "conditions": [
            {
              "action": "hide",
              "logic": "any",
              "rules": [{ "fieldId": "has-insurance", "operator": "equals", "value": false }]
            }
          ]
        },
        {
          "id": "skills",
          "type": "multiselect",
          "label": "Skills",
          "options": ["Rust", "Typography", "Accessibility", "Print"]
        },
        { "id": "interview-score", "type": "rating", "label": "Interview score" },
        { "id": "signature", "type": "signature", "label": "Signature", "required": true }
      ]
    }
  ]
}
"##;

const EXAMPLE_VALUES_JSON: &str = r##"{
  "full-name": "Ada Lovelace",
  "email": "ada@example.com",
  "engagement": "Hourly",
  "hourly-rate": 95,
  "start-date": "2026-04-01",
  "has-insurance": true,
  "insurer": "Analytical Mutual, policy 1843-AE",
  "skills": ["Rust", "Print"],
  "interview-score": 4,
  "signature": "Ada Lovelace"
}
"##;
