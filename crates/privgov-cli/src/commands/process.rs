//! `privgov process`.

use crate::cli::{print_json, Cli};
use crate::error::CliError;
use clap::{Args, Subcommand};
use privgov_advisory::{AdvisoryClient, AdvisoryConfig};
use privgov_core::validate::validate_activity;
use privgov_core::{ActivityDraft, AssessmentInput, ProcessStatus, RiskAssessment};
use privgov_risk::RiskAssessor;

#[derive(Debug, Args)]
pub struct ProcessCommand {
    #[command(subcommand)]
    action: Action,
}

/// Record fields shared by `add` and `update`.
#[derive(Debug, Args)]
struct DraftArgs {
    /// Owning department id
    #[arg(long)]
    department: String,

    /// Activity title
    #[arg(long)]
    title: String,

    /// Free-text description
    #[arg(long)]
    description: Option<String>,

    /// Data subject categories, comma separated
    #[arg(long, value_delimiter = ',')]
    subjects: Vec<String>,

    /// Personal data categories, comma separated
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,

    /// Lawful basis
    #[arg(long)]
    lawful_basis: String,

    /// Recipients, comma separated
    #[arg(long, value_delimiter = ',')]
    recipients: Vec<String>,

    /// Retention period, e.g. "5 years after separation"
    #[arg(long)]
    retention: String,
}

impl DraftArgs {
    fn to_draft(&self) -> ActivityDraft {
        ActivityDraft {
            dept_id: self.department.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            data_subjects: self.subjects.clone(),
            data_categories: self.categories.clone(),
            lawful_basis: self.lawful_basis.clone(),
            recipients: self.recipients.clone(),
            retention_period: self.retention.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List processing activities
    List {
        /// Only activities of this department
        #[arg(long)]
        department: Option<String>,
        /// Only approved activities
        #[arg(long)]
        approved: bool,
    },

    /// Show one activity
    Show {
        /// Activity id
        id: String,
    },

    /// Create an activity. Risk is assessed before the record is stored.
    Add(DraftArgs),

    /// Replace the fields of an activity. Risk is re-assessed.
    Update {
        /// Activity id
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Re-run the risk assessment and store the resulting tier
    Assess {
        /// Activity id
        id: String,
    },

    /// Move an activity through the workflow (DRAFT, REVIEW, APPROVED)
    SetStatus {
        /// Activity id
        id: String,
        /// Target status
        status: String,
    },

    /// Delete an activity
    Remove {
        /// Activity id
        id: String,
    },
}

impl ProcessCommand {
    pub async fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let store = cli.open_store()?;
        match &self.action {
            Action::List {
                department,
                approved,
            } => {
                let activities = match (department, approved) {
                    (Some(dept), _) => store.processes_by_department(dept)?,
                    (None, true) => store.approved_processes()?,
                    (None, false) => store.processes()?,
                };
                let activities = if *approved && department.is_some() {
                    activities
                        .into_iter()
                        .filter(|a| a.status == ProcessStatus::Approved)
                        .collect()
                } else {
                    activities
                };
                print_json(&activities)
            }
            Action::Show { id } => print_json(&store.process(id)?),
            Action::Add(args) => {
                let draft = args.to_draft();
                validate_activity(&draft)?;
                store.department(&draft.dept_id)?;

                let assessment = assess(AssessmentInput::from(&draft)).await?;
                let activity = store.create_process(draft, Some(assessment.risk_level))?;
                print_json(&serde_json::json!({
                    "activity": activity,
                    "assessment": assessment,
                }))
            }
            Action::Update { id, draft } => {
                let draft = draft.to_draft();
                validate_activity(&draft)?;
                store.department(&draft.dept_id)?;

                let assessment = assess(AssessmentInput::from(&draft)).await?;
                let activity = store.update_process(id, draft, Some(assessment.risk_level))?;
                print_json(&serde_json::json!({
                    "activity": activity,
                    "assessment": assessment,
                }))
            }
            Action::Assess { id } => {
                let activity = store.process(id)?;
                let assessment = assess(AssessmentInput::from(&activity)).await?;
                store.set_process_risk(id, assessment.risk_level)?;
                print_json(&assessment)
            }
            Action::SetStatus { id, status } => {
                let status: ProcessStatus = status
                    .to_uppercase()
                    .parse()
                    .map_err(|_| CliError::InvalidArgument(format!("unknown status: {status}")))?;
                store.set_process_status(id, status)?;
                print_json(&store.process(id)?)
            }
            Action::Remove { id } => {
                store.delete_process(id)?;
                println!("deleted {id}");
                Ok(())
            }
        }
    }
}

/// One-shot assessment with a fresh advisory client from the environment.
async fn assess(input: AssessmentInput) -> Result<RiskAssessment, CliError> {
    let client = AdvisoryClient::with_config(AdvisoryConfig::from_env())?;
    let assessor = RiskAssessor::new(client);
    Ok(assessor.assess(&input).await)
}
