use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Terminal front-end for the academy admin panel and public website.
#[derive(Debug, Parser)]
#[command(name = "tahfeez", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in as an admin and remember the session.
    Login {
        #[arg(long, env = "TAHFEEZ_ADMIN_EMAIL")]
        email: String,
        #[arg(long, env = "TAHFEEZ_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the session.
    Logout,
    /// Show the signed-in admin.
    Whoami,
    /// Show dashboard counters and pending work.
    Dashboard,
    /// List one page of records.
    List(ListArgs),
    /// Add a student or teacher.
    Create(RecordFields),
    /// Change an existing student or teacher.
    Update {
        #[command(flatten)]
        fields: RecordFields,
        id: u64,
    },
    /// Delete a record.
    Delete {
        resource: ResourceKind,
        id: u64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Approve or reject a pending request.
    Review {
        resource: ReviewableKind,
        id: u64,
        decision: Decision,
        /// Reason shown to the student; required when rejecting.
        #[arg(long)]
        reason: Option<String>,
        /// Internal note stored with an approval.
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        yes: bool,
    },
    /// Move a complaint to another status.
    ComplaintStatus {
        id: u64,
        /// pending, in_progress, resolved or closed.
        status: String,
        #[arg(long)]
        reply: Option<String>,
    },
    /// Calculate a teacher's salary for a month.
    SalaryCalculate {
        #[arg(long)]
        teacher_id: u64,
        /// Month in YYYY-MM form.
        #[arg(long)]
        month: String,
    },
    /// Mark a calculated salary as paid.
    SalaryPay {
        id: u64,
        #[arg(long)]
        yes: bool,
    },
    /// Show the public home page content.
    WebsiteHome,
    /// Submit the public sign-up form.
    Register(RegisterArgs),
    /// Show or change the interface language.
    Locale {
        /// ar or en.
        locale: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    pub resource: ResourceKind,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long)]
    pub per_page: Option<u32>,
    #[arg(long)]
    pub search: Option<String>,
}

/// Form values for `create` and `update`. Omitted flags keep the current
/// value.
#[derive(Debug, Clone, Args)]
pub struct RecordFields {
    pub resource: PersonKind,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    /// male or female.
    #[arg(long)]
    pub gender: Option<String>,
    /// active, inactive or suspended.
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub teacher_id: Option<u64>,
    #[arg(long)]
    pub package_id: Option<u64>,
    #[arg(long)]
    pub hourly_rate: Option<f64>,
    #[arg(long)]
    pub bio_ar: Option<String>,
    #[arg(long)]
    pub bio_en: Option<String>,
    /// Profile picture (jpg, jpeg, png or gif).
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub age: Option<u32>,
    /// male or female.
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub package_id: Option<u64>,
    #[arg(long)]
    pub preferred_time: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Students,
    Teachers,
    Supervisors,
    Packages,
    Features,
    Lessons,
    Testimonials,
    HonorBoards,
    Certificates,
    Receipts,
    Salaries,
    Complaints,
    ScheduleRequests,
    SubscriptionPauses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PersonKind {
    Students,
    Teachers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReviewableKind {
    Receipts,
    ScheduleRequests,
    SubscriptionPauses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Decision {
    Approve,
    Reject,
}
