use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use wrenchprep::{
    AppState, Config,
    api::StudyApi,
    model::{ActivityRecord, ActivityType, StudyMode},
    tracking::{MilestoneCallback, Notification, Notifier, TrackOutcome},
};

#[derive(Parser, Debug)]
#[command(about = "CLI companion for the exam-prep study API", long_about = None)]
pub struct Cli {
    /// Use ./config.toml instead of the per-user config
    #[arg(long, global = true, default_value_t = false)]
    pub local: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a finished study activity
    Track {
        #[arg(value_enum)]
        kind: ActivityKind,
        #[arg(long)]
        questions: Option<i64>,
        #[arg(long)]
        correct: Option<i64>,
        #[arg(long)]
        score: Option<f64>,
        /// Seconds spent
        #[arg(long)]
        time_spent: Option<u64>,
        #[arg(long, default_value_t = false)]
        passed: bool,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long = "subtopic")]
        subtopics: Vec<i64>,
    },

    /// Ask the server for newly earned badges
    Badges,

    /// Show overall progress
    Progress,

    /// Show per-category stats
    Categories,

    /// Validate and show the current streak
    Streak,

    /// Today's progress
    Daily {
        #[command(subcommand)]
        action: Option<DailyCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DailyCommands {
    /// Mark one of today's requirements as done
    Complete {
        #[arg(value_enum)]
        mode: ModeArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ActivityKind {
    Review,
    Practice,
    Quiz,
    MockExam,
}

impl From<ActivityKind> for ActivityType {
    fn from(value: ActivityKind) -> Self {
        match value {
            ActivityKind::Review => Self::Review,
            ActivityKind::Practice => Self::Practice,
            ActivityKind::Quiz => Self::Quiz,
            ActivityKind::MockExam => Self::MockExam,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Quiz,
    Review,
    Practice,
}

impl From<ModeArg> for StudyMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Quiz => Self::Quiz,
            ModeArg::Review => Self::Review,
            ModeArg::Practice => Self::Practice,
        }
    }
}

struct PrintNotifier;

impl Notifier for PrintNotifier {
    fn notify(&self, notification: Notification) {
        if notification.is_error() {
            eprintln!("! {notification}");
        } else {
            println!("* {notification}");
        }
    }
}

#[tokio::main]
async fn main() -> wrenchprep::error::AppResult<()> {
    wrenchprep::setup_trace();
    let args = Cli::parse();

    let config = Config::load(args.local)?;
    let state = AppState::from_config(&config, Arc::new(PrintNotifier))?;

    match args.command {
        Commands::Track {
            kind,
            questions,
            correct,
            score,
            time_spent,
            passed,
            category,
            subtopics,
        } => {
            let mut record = ActivityRecord::new(kind.into());
            if let Some(answered) = questions {
                record = record.with_questions_answered(answered);
            }
            if let (Some(answered), Some(correct)) = (questions, correct) {
                record = record.with_questions(answered, correct);
            }
            if let Some(score) = score {
                record = record.with_score(score);
            }
            if let Some(seconds) = time_spent {
                record = record.with_time_spent(seconds);
            }
            if let Some(category) = category {
                record = record.with_category(category);
            }
            if !subtopics.is_empty() {
                record = record.with_subtopics(subtopics);
            }
            if passed {
                record = record.with_passed(true);
            }

            let on_milestone: MilestoneCallback =
                Arc::new(|m| println!("  {m}% of the syllabus covered, keep going."));
            let flow = state.study_flow_with(Some(on_milestone));
            // baseline for milestone detection
            if let Err(e) = flow.progress().await {
                eprintln!("could not load current progress: {e}");
            }

            let report = flow.complete_activity(&record).await?;
            match report.outcome {
                TrackOutcome::Skipped => println!("Nothing answered, activity not recorded."),
                TrackOutcome::Tracked(_) => {
                    if let Some(progress) = report.progress {
                        println!("Recorded. Overall progress: {:.1}%", progress.overall_progress);
                    } else {
                        println!("Recorded.");
                    }
                }
            }
        }

        Commands::Badges => {
            let check = state.api().check_badges().await?;
            state.milestones().announce_badges(&check.new_badges);
            if check.new_badges.is_empty() {
                println!("No new badges.");
            }
        }

        Commands::Progress => {
            let progress = state.study_flow().progress().await?;
            println!("Overall progress: {:.1}%", progress.overall_progress);
            println!(
                "Questions: {} answered, {} correct",
                progress.questions_answered, progress.correct_answers
            );
            println!("Study time: {} min", progress.total_study_time / 60);
            println!("Battles: {} won, {} lost", progress.battle_wins, progress.battle_losses);
        }

        Commands::Categories => {
            let stats = state.api().category_stats().await?;
            for s in stats {
                println!(
                    "{:>4}  {:<30} {:>5.1}%  ({}/{})",
                    s.category_id, s.name, s.progress, s.correct_answers, s.questions_answered
                );
            }
        }

        Commands::Streak => {
            let report = state.streak_evaluator().evaluate().await?;
            println!("Current streak: {} day(s)", report.current_streak);
            if let Some(date) = report.last_active_date {
                println!("Last active: {date}");
            }
            if report.requirements_met_today {
                println!("Today's requirements are met.");
            } else {
                let remaining: Vec<String> =
                    report.remaining_today.iter().map(|m| m.to_string()).collect();
                println!("Still to do today: {}", remaining.join(", "));
            }
            if let (Some(next), Some(distance)) =
                (report.next_milestone, report.distance_to_next_milestone)
            {
                println!("Next milestone: {next}% ({distance:.1}% to go)");
            }
        }

        Commands::Daily { action } => {
            let daily = state.daily_progress();
            let day = match action {
                Some(DailyCommands::Complete { mode }) => daily.complete_mode(mode.into()).await?,
                None => daily.today().await?,
            };

            let mark = |done: bool| if done { "x" } else { " " };
            println!("[{}] quiz", mark(day.quiz_completed));
            println!("[{}] review", mark(day.review_time_completed));
            println!("[{}] practice", mark(day.practice_completed));
        }
    }

    Ok(())
}
