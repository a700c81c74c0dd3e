use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use threadsmith_core::{
    rng, ArcType, CompanyContext, ConversationThread, PipelineConfig, ReferenceData,
};
use threadsmith_generation::{
    AnthropicGenerator, CampaignPlan, ConversationDesigner, MockGenerator, TextGenerator,
    ThreadRequest, UsageTracker, WeeklyPlanner,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "emotionally-modeled synthetic conversation pipeline")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "threadsmith.toml")]
    config: String,

    /// Seed for deterministic runs; omit for OS entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Use the mock generator instead of a real provider
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a single thread and print it with its score
    Generate {
        #[arg(short, long, default_value = "sysadmin")]
        subreddit: String,

        /// Arc type: discovery, comparison, or problem_solver
        #[arg(short, long, default_value = "discovery")]
        arc: String,

        /// The user problem the thread is built around
        #[arg(short, long)]
        problem: String,

        /// Product name to weave in (optional)
        #[arg(long)]
        company: Option<String>,

        /// One-line product description
        #[arg(long, default_value = "")]
        product: String,
    },

    /// Score a thread from a JSON file
    Score {
        /// Path to a ConversationThread JSON file
        file: String,

        #[arg(short, long, default_value = "sysadmin")]
        subreddit: String,
    },

    /// Build a week of scheduled conversations and print the plan as JSON
    Week {
        #[arg(short, long, value_delimiter = ',', default_value = "sysadmin,selfhosted")]
        subreddits: Vec<String>,

        #[arg(short, long, value_delimiter = ',', default_value = "discovery,problem_solver")]
        arcs: Vec<String>,

        /// Problem pool, comma-separated
        #[arg(short, long, value_delimiter = ',')]
        problems: Vec<String>,
    },
}

fn build_generator(config: &PipelineConfig, mock: bool) -> Result<Arc<dyn TextGenerator>> {
    if mock {
        return Ok(Arc::new(MockGenerator::always(
            "had the same thing happen twice last month\n\ntook me 3 days to notice honestly, \
             what finally worked was checking the cron env",
        )));
    }
    match config.llm.provider.as_str() {
        "anthropic" => {
            let mut generator = AnthropicGenerator::from_env(&config.llm.model)?;
            if let Some(base_url) = &config.llm.base_url {
                generator = generator.with_base_url(base_url);
            }
            Ok(Arc::new(generator))
        }
        "mock" => Ok(Arc::new(MockGenerator::always(
            "same boat here\n\nswitched approaches twice before something stuck",
        ))),
        other => anyhow::bail!("unknown provider '{}' (try --mock)", other),
    }
}

fn company_from_args(name: Option<String>, product: String) -> Option<CompanyContext> {
    name.map(|name| CompanyContext {
        name,
        product_description: product,
        value_propositions: vec![],
        keywords: vec![],
        activities: vec![],
    })
}

fn print_score(thread: &ConversationThread) {
    if let Some(q) = &thread.quality {
        println!("\n── quality ──");
        println!("overall: {:.1} ({:?})", q.overall, q.grade);
        println!(
            "  relevance {:.1} | specificity {:.1} | authenticity {:.1} | value-first {:.1} | engagement {:.1}",
            q.dimensions.relevance,
            q.dimensions.specificity,
            q.dimensions.authenticity,
            q.dimensions.value_first,
            q.dimensions.engagement
        );
        for issue in &q.issues {
            println!("  [{:?}] {}", issue.severity, issue.message);
        }
        for s in &q.suggestions {
            println!("  → {}", s);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = PipelineConfig::load_or_default(&args.config);
    let reference = ReferenceData::builtin();

    let mut rng = match args.seed {
        Some(seed) => rng::seeded(seed),
        None => rng::from_entropy(),
    };

    let generator = build_generator(&config, args.mock)?;
    let designer = ConversationDesigner::new(generator, reference, config.clone());

    match args.command {
        Command::Generate {
            subreddit,
            arc,
            problem,
            company,
            product,
        } => {
            let request = ThreadRequest {
                subreddit,
                arc: ArcType::parse(&arc)?,
                problem,
            };
            let company = company_from_args(company, product);
            let mut usage = UsageTracker::default();

            info!("generating {} thread for r/{}", request.arc, request.subreddit);
            let thread = designer
                .design_thread(&request, company.as_ref(), &mut usage, &mut rng)
                .await?;

            println!("{}", serde_json::to_string_pretty(&thread)?);
            print_score(&thread);
        }

        Command::Score { file, subreddit } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file))?;
            let mut thread: ConversationThread =
                serde_json::from_str(&content).context("failed to parse thread JSON")?;
            let sub = designer.reference().subreddit(&subreddit)?.clone();

            let quality = threadsmith_scoring::predict_quality(&thread, &sub, 0.5, None);
            thread.quality = Some(quality);
            print_score(&thread);
        }

        Command::Week {
            subreddits,
            arcs,
            problems,
        } => {
            let arcs = arcs
                .iter()
                .map(|a| ArcType::parse(a))
                .collect::<Result<Vec<_>, _>>()?;
            let plan = CampaignPlan {
                company: None,
                problems,
                subreddits,
                arcs,
            };
            let planner = WeeklyPlanner::new(designer, config.schedule.clone());

            info!("building weekly schedule");
            let week = planner.build_week(&plan, Utc::now(), &mut rng).await?;

            println!("{}", serde_json::to_string_pretty(&week)?);
            info!("scheduled {} conversations", week.len());
        }
    }

    Ok(())
}
