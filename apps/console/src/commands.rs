use std::sync::Arc;

use tahfeez_application::{
    AdminStore, CommandOutcome, Confirmation, ListController, Notifier, RecordAction, SalaryApi,
    WebsiteStore, user_facing_message,
};
use tahfeez_core::{AppError, AppResult, Locale};
use tahfeez_domain::{
    Certificate, Complaint, ComplaintStatus, Feature, Gender, HonorBoardEntry, Lesson, Package,
    PaymentReceipt, RegistrationForm, Resource, ResourceDraft, ResourceFilter, ReviewDecision,
    SalaryCalculation, ScheduleChangeRequest, Student, SubscriptionPause, Supervisor, Teacher,
    Testimonial, validate_month,
};
use tracing::info;

use crate::cli::{
    Command, Decision, ListArgs, PersonKind, RecordFields, RegisterArgs, ResourceKind,
    ReviewableKind,
};
use crate::forms::{FillDraft, FormValues};
use crate::render;
use crate::terminal::{TerminalConfirmation, TerminalNotifier};

macro_rules! with_resource {
    ($kind:expr, $resource:ident => $body:expr) => {
        match $kind {
            ResourceKind::Students => {
                type $resource = Student;
                $body
            }
            ResourceKind::Teachers => {
                type $resource = Teacher;
                $body
            }
            ResourceKind::Supervisors => {
                type $resource = Supervisor;
                $body
            }
            ResourceKind::Packages => {
                type $resource = Package;
                $body
            }
            ResourceKind::Features => {
                type $resource = Feature;
                $body
            }
            ResourceKind::Lessons => {
                type $resource = Lesson;
                $body
            }
            ResourceKind::Testimonials => {
                type $resource = Testimonial;
                $body
            }
            ResourceKind::HonorBoards => {
                type $resource = HonorBoardEntry;
                $body
            }
            ResourceKind::Certificates => {
                type $resource = Certificate;
                $body
            }
            ResourceKind::Receipts => {
                type $resource = PaymentReceipt;
                $body
            }
            ResourceKind::Salaries => {
                type $resource = SalaryCalculation;
                $body
            }
            ResourceKind::Complaints => {
                type $resource = Complaint;
                $body
            }
            ResourceKind::ScheduleRequests => {
                type $resource = ScheduleChangeRequest;
                $body
            }
            ResourceKind::SubscriptionPauses => {
                type $resource = SubscriptionPause;
                $body
            }
        }
    };
}

fn say(locale: Locale, arabic: &'static str, english: &'static str) -> &'static str {
    match locale {
        Locale::Ar => arabic,
        Locale::En => english,
    }
}

/// Drives the stores from parsed command-line input.
pub struct Console {
    admin: AdminStore,
    website: WebsiteStore,
    notifier: Arc<dyn Notifier>,
}

impl Console {
    pub fn new(admin: AdminStore, website: WebsiteStore) -> Self {
        Self {
            admin,
            website,
            notifier: Arc::new(TerminalNotifier),
        }
    }

    fn locale(&self) -> Locale {
        self.website.locale()
    }

    /// Runs one command. Every failure has been shown to the user by the
    /// time this returns.
    pub async fn run(&mut self, command: Command) -> AppResult<()> {
        match command {
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::Logout => self.logout().await,
            Command::Whoami => self.whoami().await,
            Command::Dashboard => self.dashboard().await,
            Command::List(args) => {
                with_resource!(args.resource, R => self.list::<R>(&args).await)
            }
            Command::Create(fields) => self.save_person(None, fields).await,
            Command::Update { fields, id } => self.save_person(Some(id), fields).await,
            Command::Delete { resource, id, yes } => {
                with_resource!(resource, R => self.delete::<R>(id, yes).await)
            }
            Command::Review {
                resource,
                id,
                decision,
                reason,
                note,
                yes,
            } => {
                let decision = match decision {
                    Decision::Approve => ReviewDecision::Approve { note },
                    Decision::Reject => ReviewDecision::Reject {
                        reason: reason.unwrap_or_default(),
                    },
                };
                let action = RecordAction::Review(decision);
                match resource {
                    ReviewableKind::Receipts => {
                        self.perform::<PaymentReceipt>(id, action, yes).await
                    }
                    ReviewableKind::ScheduleRequests => {
                        self.perform::<ScheduleChangeRequest>(id, action, yes).await
                    }
                    ReviewableKind::SubscriptionPauses => {
                        self.perform::<SubscriptionPause>(id, action, yes).await
                    }
                }
            }
            Command::ComplaintStatus { id, status, reply } => {
                let status = self.report(status.parse::<ComplaintStatus>()).await?;
                let action = RecordAction::ComplaintStatus { status, reply };
                self.perform::<Complaint>(id, action, false).await
            }
            Command::SalaryCalculate { teacher_id, month } => {
                self.salary_calculate(teacher_id, &month).await
            }
            Command::SalaryPay { id, yes } => {
                self.perform::<SalaryCalculation>(id, RecordAction::MarkSalaryPaid, yes)
                    .await
            }
            Command::WebsiteHome => self.website_home().await,
            Command::Register(args) => self.register(args).await,
            Command::Locale { locale } => self.switch_locale(locale).await,
        }
    }

    async fn report<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(error) => {
                let error = self.admin.handle_error(error).await;
                self.notifier
                    .alert(&user_facing_message(&error, self.locale()))
                    .await;
                Err(error)
            }
        }
    }

    async fn require_session(&mut self) -> AppResult<()> {
        if self.admin.session().is_some() {
            return Ok(());
        }

        let message = say(
            self.locale(),
            "يرجى تسجيل الدخول أولاً: tahfeez login",
            "Please sign in first: tahfeez login",
        );
        self.notifier.alert(message).await;
        Err(AppError::Unauthorized(message.to_owned()))
    }

    fn controller<R: Resource>(&self, assume_yes: bool) -> ListController<R> {
        let confirmation: Arc<dyn Confirmation> = Arc::new(TerminalConfirmation::new(assume_yes));
        self.admin
            .list_controller::<R>(self.notifier.clone(), confirmation)
    }

    async fn login(&mut self, email: &str, password: &str) -> AppResult<()> {
        let result = self.admin.login(email, password).await;
        let admin = self.report(result).await?;
        let greeting = say(self.locale(), "مرحباً", "Welcome");
        println!("{greeting} {}", admin.name());
        Ok(())
    }

    async fn logout(&mut self) -> AppResult<()> {
        let result = self.admin.logout().await;
        self.report(result).await?;
        println!("{}", say(self.locale(), "تم تسجيل الخروج", "Signed out"));
        Ok(())
    }

    async fn whoami(&mut self) -> AppResult<()> {
        self.require_session().await?;
        let result = self.admin.fetch_profile().await;
        let admin = self.report(result).await?;
        match admin.email() {
            Some(email) => println!("{} <{email}>", admin.name()),
            None => println!("{}", admin.name()),
        }
        Ok(())
    }

    async fn dashboard(&mut self) -> AppResult<()> {
        self.require_session().await?;
        self.admin.fetch_dashboard().await;
        print!("{}", render::dashboard(self.admin.dashboard(), self.locale()));

        if self.admin.session().is_none() {
            return self.require_session().await;
        }
        Ok(())
    }

    async fn list<R: Resource>(&mut self, args: &ListArgs) -> AppResult<()> {
        self.require_session().await?;
        let filters = R::Filter::default().with_search(args.search.clone());
        let mut controller = self.controller::<R>(false).with_filters(filters);
        if let Some(per_page) = args.per_page {
            controller = controller.with_per_page(per_page);
        }

        let result = controller.set_page(args.page).await;
        self.report(result).await?;
        print!(
            "{}",
            render::list_view(controller.view(), controller.controls(), self.locale())
        );
        Ok(())
    }

    async fn save_person(&mut self, id: Option<u64>, fields: RecordFields) -> AppResult<()> {
        self.require_session().await?;
        let resource = fields.resource;
        let values = FormValues::from_fields(fields).await;
        let values = self.report(values).await?;
        match resource {
            PersonKind::Students => self.save::<Student>(id, values).await,
            PersonKind::Teachers => self.save::<Teacher>(id, values).await,
        }
    }

    /// Opens the form (empty, or seeded from the stored record), applies the
    /// given values and submits it.
    async fn save<R>(&mut self, id: Option<u64>, values: FormValues) -> AppResult<()>
    where
        R: Resource,
        R::Draft: FillDraft,
    {
        let mut controller = self.controller::<R>(false);
        match id {
            Some(id) => {
                let result = controller.api().get(id).await;
                let record = self.report(result).await?;
                controller.open_edit(&record);
            }
            None => controller.open_create(),
        }

        let mut filled = Ok(());
        controller.edit_draft(|draft| filled = draft.fill(values));
        self.report(filled).await?;

        // Local validation failures are not alerted by the controller.
        let modal = &controller.state().modal;
        let checked = modal.draft.validate(modal.mode.draft_mode());
        self.report(checked).await?;

        let result = controller.submit().await;
        self.finish_mutation(result).await
    }

    async fn delete<R: Resource>(&mut self, id: u64, assume_yes: bool) -> AppResult<()> {
        self.require_session().await?;
        let mut controller = self.controller::<R>(assume_yes);
        let result = controller.delete(id).await;
        self.finish_mutation(result).await
    }

    async fn perform<R: Resource>(
        &mut self,
        id: u64,
        action: RecordAction,
        assume_yes: bool,
    ) -> AppResult<()> {
        self.require_session().await?;
        let mut controller = self.controller::<R>(assume_yes);
        let result = controller.perform(id, action).await;
        self.finish_mutation(result).await
    }

    async fn finish_mutation(&mut self, result: AppResult<CommandOutcome>) -> AppResult<()> {
        // The controller has already alerted on failure.
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(error) => return Err(self.admin.handle_error(error).await),
        };

        let locale = self.locale();
        let message = match outcome {
            CommandOutcome::Completed => say(locale, "تمت العملية بنجاح", "Done"),
            CommandOutcome::Cancelled => say(locale, "تم إلغاء العملية", "Cancelled"),
            CommandOutcome::Ignored => say(
                locale,
                "هناك عملية أخرى قيد التنفيذ",
                "Another operation is in progress",
            ),
        };
        println!("{message}");
        Ok(())
    }

    async fn salary_calculate(&mut self, teacher_id: u64, month: &str) -> AppResult<()> {
        self.require_session().await?;
        self.report(validate_month(month)).await?;

        let result = SalaryApi::new(self.admin.gateway().clone())
            .calculate(teacher_id, month)
            .await;
        let salary = self.report(result).await?;
        info!(salary_id = salary.id, teacher_id, month, "salary calculated");
        print!("{}", render::salary(&salary, self.locale()));
        Ok(())
    }

    async fn website_home(&mut self) -> AppResult<()> {
        self.website.fetch_home().await;
        print!("{}", render::home(self.website.home(), self.locale()));
        Ok(())
    }

    async fn register(&mut self, args: RegisterArgs) -> AppResult<()> {
        let gender = args.gender.as_deref().map(str::parse::<Gender>).transpose();
        let gender = self.report(gender).await?;
        let form = RegistrationForm {
            name: args.name,
            email: args.email,
            phone: args.phone,
            age: args.age,
            gender,
            country: args.country,
            package_id: args.package_id,
            preferred_time: args.preferred_time,
            notes: args.notes,
        };

        let outcome = match self.website.submit_registration(&form).await {
            Ok(outcome) => outcome,
            Err(error) => {
                if let Some(message) = self.website.registration().error.as_deref() {
                    self.notifier.alert(message).await;
                }
                return Err(error);
            }
        };

        let locale = self.locale();
        let message = match outcome {
            CommandOutcome::Completed => say(
                locale,
                "تم استلام طلب التسجيل، سنتواصل معك قريباً",
                "Registration received, we will contact you soon",
            ),
            CommandOutcome::Cancelled => say(locale, "تم إلغاء العملية", "Cancelled"),
            CommandOutcome::Ignored => say(
                locale,
                "هناك عملية أخرى قيد التنفيذ",
                "Another operation is in progress",
            ),
        };
        println!("{message}");
        Ok(())
    }

    async fn switch_locale(&mut self, locale: Option<String>) -> AppResult<()> {
        if let Some(locale) = locale {
            let locale = self.report(locale.parse::<Locale>()).await?;
            let result = self.website.set_locale(locale).await;
            self.report(result).await?;
        }

        println!("{}", self.locale());
        Ok(())
    }
}
