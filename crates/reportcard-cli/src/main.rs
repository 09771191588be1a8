use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use reportcard_cli::parse_student_ids;
use reportcard_cli::sink::FileSink;
use reportcard_config::{BatchConfig, SchoolProfile, TemplateConfig};
use reportcard_engine::{
    BatchOrchestrator, InMemoryProvider, PlaceholderResolver, ReportGenerator, Template,
    TemplateStore,
};
use reportcard_models::{ReportContext, StudentId};

#[derive(Parser)]
#[command(name = "reportcard-cli")]
#[command(about = "Report card CLI - Generate report cards offline and inspect templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one student's report card
    Generate {
        /// JSON fixture with `students` and `grades`
        #[arg(short = 'd', long)]
        data: PathBuf,

        /// Student identifier
        #[arg(short = 's', long)]
        student: String,

        /// Academic term, e.g. ONE
        #[arg(short = 't', long)]
        term: String,

        /// Class label printed on the report, e.g. S.2
        #[arg(short = 'c', long)]
        class: String,

        /// Template path (defaults to REPORT_TEMPLATE_PATH)
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output directory
        #[arg(short = 'o', long, default_value = ".")]
        out: PathBuf,
    },
    /// Generate report cards for several students
    Batch {
        /// JSON fixture with `students` and `grades`
        #[arg(short = 'd', long)]
        data: PathBuf,

        /// Comma separated student identifiers
        #[arg(short = 's', long)]
        students: String,

        /// Academic term, e.g. ONE
        #[arg(short = 't', long)]
        term: String,

        /// Class label printed on the report, e.g. S.2
        #[arg(short = 'c', long)]
        class: String,

        /// Template path (defaults to REPORT_TEMPLATE_PATH)
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output directory
        #[arg(short = 'o', long, default_value = ".")]
        out: PathBuf,

        /// Students processed at once (defaults to BATCH_MAX_CONCURRENCY)
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// List the placeholders a template contains
    InspectTemplate {
        /// Template path (defaults to REPORT_TEMPLATE_PATH)
        #[arg(long)]
        template: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            data,
            student,
            term,
            class,
            template,
            out,
        } => handle_generate(data, student, term, class, template, out).await,
        Commands::Batch {
            data,
            students,
            term,
            class,
            template,
            out,
            concurrency,
        } => handle_batch(data, students, term, class, template, out, concurrency).await,
        Commands::InspectTemplate { template } => handle_inspect_template(template),
    }
}

fn template_path(template: Option<PathBuf>) -> PathBuf {
    template.unwrap_or_else(|| TemplateConfig::from_env().path)
}

fn load_provider(data: &Path) -> InMemoryProvider {
    match InMemoryProvider::from_fixture_file(data) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("❌ Error loading fixture: {}", e);
            std::process::exit(1);
        }
    }
}

/// The template is parsed once and shared by every report of the run.
fn load_generator(template: Option<PathBuf>) -> (ReportGenerator, SchoolProfile) {
    let path = template_path(template);
    let template = match Template::load(&path) {
        Ok(template) => template,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let school = SchoolProfile::from_env();
    let generator = ReportGenerator::new(
        TemplateStore::in_memory(template),
        PlaceholderResolver::new(school.clone()),
    );
    (generator, school)
}

async fn handle_generate(
    data: PathBuf,
    student: String,
    term: String,
    class: String,
    template: Option<PathBuf>,
    out: PathBuf,
) {
    let provider = load_provider(&data);
    let (generator, school) = load_generator(template);
    let ctx = ReportContext::new(term, class, school.academic_year);
    let timeout = BatchConfig::from_env().fetch_timeout;

    let report = match generator
        .generate_for_student(&provider, &StudentId::from(student), &ctx, timeout)
        .await
    {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ Error generating report card: {}", e);
            std::process::exit(1);
        }
    };

    match FileSink::new(out).write(&report).await {
        Ok(path) => {
            println!("✅ Report card written to {}", path.display());
            println!(
                "   Total: {}  Average: {:.1}  Grade: {}",
                report.metrics.total_marks.round(),
                report.metrics.average_score,
                report.metrics.performance_grade
            );
        }
        Err(e) => {
            eprintln!("❌ Error writing report card: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_batch(
    data: PathBuf,
    students: String,
    term: String,
    class: String,
    template: Option<PathBuf>,
    out: PathBuf,
    concurrency: Option<usize>,
) {
    let provider = load_provider(&data);
    let (generator, school) = load_generator(template);
    let ctx = ReportContext::new(term, class, school.academic_year);

    let mut config = BatchConfig::from_env();
    if let Some(concurrency) = concurrency {
        config.max_concurrency = concurrency.max(1);
    }

    let orchestrator = BatchOrchestrator::new(Arc::new(generator), config)
        .with_sink(Arc::new(FileSink::new(&out)));

    let ids = parse_student_ids(&students);
    let result = match orchestrator.run_batch(&ids, &ctx, &provider).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    for outcome in &result.outcomes {
        let mark = if outcome.success { "✅" } else { "❌" };
        println!("{} {}: {}", mark, outcome.student_id, outcome.message);
    }

    let summary = result.summary();
    println!(
        "\nBatch processing completed for {} students ({} succeeded, {} failed) in {}",
        summary.total,
        summary.succeeded,
        summary.failed,
        out.display()
    );

    if summary.failed > 0 {
        std::process::exit(2);
    }
}

fn handle_inspect_template(template: Option<PathBuf>) {
    let path = template_path(template);
    let template = match Template::load(&path) {
        Ok(template) => template,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    println!("📄 {}", path.display());
    for token in template.placeholders() {
        println!("   {}", token);
    }

    let missing = template.missing_placeholders();
    if missing.is_empty() {
        println!("✅ All known placeholders are present");
    } else {
        println!("⚠️  Missing placeholders:");
        for token in missing {
            println!("   {}", token);
        }
    }
}
