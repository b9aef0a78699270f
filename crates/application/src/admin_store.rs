use std::sync::Arc;

use tahfeez_core::{AdminIdentity, AdminSession, AppError, AppResult, Locale};
use tahfeez_domain::{
    Complaint, ComplaintFilter, ComplaintStatus, DashboardStats, PageRequest, PaymentReceipt,
    ReceiptFilter, Resource, ReviewFilter, ScheduleChangeRequest, Student, StudentFilter,
    Teacher, TeacherFilter,
};
use tracing::{info, warn};

use crate::api_ports::ApiGateway;
use crate::auth_api::AuthApi;
use crate::dashboard_api::DashboardApi;
use crate::list_controller::ListController;
use crate::resource_api::ResourceApi;
use crate::slice::Slice;
use crate::ui_ports::{Confirmation, Notifier, SESSION_STORAGE_KEY, SessionStorage};

/// Rows shown in each dashboard panel.
pub const DASHBOARD_PANEL_SIZE: u32 = 5;
/// Page size used to load every picker option at once.
pub const OPTIONS_PAGE_SIZE: u32 = 1000;

/// Panels of the admin dashboard, each loaded independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Server counters.
    pub stats: Slice<DashboardStats>,
    /// Latest enrolled students.
    pub recent_students: Slice<Vec<Student>>,
    /// Receipts waiting for review.
    pub pending_receipts: Slice<Vec<PaymentReceipt>>,
    /// Complaints not yet handled.
    pub pending_complaints: Slice<Vec<Complaint>>,
    /// Schedule changes waiting for review.
    pub pending_schedule_requests: Slice<Vec<ScheduleChangeRequest>>,
}

/// Global admin state: session, dashboard panels and picker options.
pub struct AdminStore {
    gateway: ApiGateway,
    storage: Arc<dyn SessionStorage>,
    session: Option<AdminSession>,
    dashboard: DashboardState,
    teacher_options: Slice<Vec<Teacher>>,
    student_options: Slice<Vec<Student>>,
}

impl AdminStore {
    /// Creates a signed-out store.
    #[must_use]
    pub fn new(gateway: ApiGateway, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            gateway: gateway.with_token(None),
            storage,
            session: None,
            dashboard: DashboardState::default(),
            teacher_options: Slice::default(),
            student_options: Slice::default(),
        }
    }

    /// Returns the current session.
    #[must_use]
    pub fn session(&self) -> Option<&AdminSession> {
        self.session.as_ref()
    }

    /// Returns the gateway bound to the current session.
    #[must_use]
    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Returns the dashboard panels.
    #[must_use]
    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    /// Returns the teacher picker options.
    #[must_use]
    pub fn teacher_options(&self) -> &Slice<Vec<Teacher>> {
        &self.teacher_options
    }

    /// Returns the student picker options.
    #[must_use]
    pub fn student_options(&self) -> &Slice<Vec<Student>> {
        &self.student_options
    }

    fn locale(&self) -> Locale {
        self.gateway.locale()
    }

    /// Loads the persisted session, if any, and reports whether one was found.
    ///
    /// Unreadable storage or a corrupt stored value is discarded rather than
    /// reported, so a broken session file never blocks startup.
    pub async fn restore_session(&mut self) -> bool {
        let stored = match self.storage.load(SESSION_STORAGE_KEY).await {
            Ok(Some(stored)) => stored,
            Ok(None) => return false,
            Err(error) => {
                warn!(error = %error, "session storage unreadable; starting signed out");
                self.discard_stored_session().await;
                return false;
            }
        };

        match serde_json::from_str::<AdminSession>(&stored) {
            Ok(session) => {
                self.install_session(session);
                true
            }
            Err(error) => {
                warn!(error = %error, "discarding unreadable stored session");
                self.discard_stored_session().await;
                false
            }
        }
    }

    /// Signs in and persists the session.
    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<AdminIdentity> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "يرجى إدخال البريد الإلكتروني وكلمة المرور".to_owned(),
            ));
        }

        let session = AuthApi::new(self.gateway.with_token(None))
            .login(email, password)
            .await?;
        let encoded = serde_json::to_string(&session)
            .map_err(|error| AppError::Internal(format!("failed to encode session: {error}")))?;
        self.storage.save(SESSION_STORAGE_KEY, &encoded).await?;

        let admin = session.admin().clone();
        info!(admin_id = admin.id(), "admin signed in");
        self.install_session(session);
        Ok(admin)
    }

    /// Signs out on the server when possible, then forgets the session.
    pub async fn logout(&mut self) -> AppResult<()> {
        if self.session.is_some()
            && let Err(error) = AuthApi::new(self.gateway.clone()).logout().await
        {
            warn!(error = %error, "server logout failed; clearing local session anyway");
        }

        self.clear_session().await
    }

    /// Refreshes the signed-in admin's profile.
    pub async fn fetch_profile(&mut self) -> AppResult<AdminIdentity> {
        let result = AuthApi::new(self.gateway.clone()).profile().await;
        self.observe(result).await
    }

    /// Loads all dashboard panels concurrently.
    ///
    /// Each panel settles as soon as its own request resolves and records its
    /// own failure; nothing is alerted.
    pub async fn fetch_dashboard(&mut self) {
        let locale = self.locale();
        let panel = PageRequest::new(1, DASHBOARD_PANEL_SIZE);
        let stats_api = DashboardApi::new(self.gateway.clone());
        let students_api = ResourceApi::<Student>::new(self.gateway.clone());
        let receipts_api = ResourceApi::<PaymentReceipt>::new(self.gateway.clone());
        let complaints_api = ResourceApi::<Complaint>::new(self.gateway.clone());
        let schedule_api = ResourceApi::<ScheduleChangeRequest>::new(self.gateway.clone());
        let student_filter = StudentFilter::default();
        let receipt_filter = ReceiptFilter::pending();
        let complaint_filter = ComplaintFilter {
            search: None,
            status: Some(ComplaintStatus::Pending),
        };
        let schedule_filter = ReviewFilter::pending();

        let dashboard = &mut self.dashboard;
        let (stats, students, receipts, complaints, schedule) = tokio::join!(
            dashboard.stats.load(stats_api.stats(), locale),
            dashboard.recent_students.load(
                async {
                    students_api
                        .list(&student_filter, panel)
                        .await
                        .map(|page| page.items)
                },
                locale,
            ),
            dashboard.pending_receipts.load(
                async {
                    receipts_api
                        .list(&receipt_filter, panel)
                        .await
                        .map(|page| page.items)
                },
                locale,
            ),
            dashboard.pending_complaints.load(
                async {
                    complaints_api
                        .list(&complaint_filter, panel)
                        .await
                        .map(|page| page.items)
                },
                locale,
            ),
            dashboard.pending_schedule_requests.load(
                async {
                    schedule_api
                        .list(&schedule_filter, panel)
                        .await
                        .map(|page| page.items)
                },
                locale,
            ),
        );

        let failures = [
            ("stats", stats),
            (Student::PATH, students),
            (PaymentReceipt::PATH, receipts),
            (Complaint::PATH, complaints),
            (ScheduleChangeRequest::PATH, schedule),
        ];
        let mut unauthorized = false;
        for (panel, failure) in failures {
            if let Some(error) = failure {
                warn!(panel, error = %error, "dashboard panel failed to load");
                unauthorized |= error.is_unauthorized();
            }
        }
        if unauthorized {
            self.expire_session().await;
        }
    }

    /// Loads every teacher for the teacher pickers.
    pub async fn fetch_teacher_options(&mut self) -> AppResult<()> {
        self.teacher_options.begin();
        let result = ResourceApi::<Teacher>::new(self.gateway.clone())
            .list(
                &TeacherFilter::default(),
                PageRequest::new(1, OPTIONS_PAGE_SIZE),
            )
            .await
            .map(|page| page.items);
        let locale = self.locale();
        match self.teacher_options.settle(result, locale) {
            Some(error) => Err(self.handle_error(error).await),
            None => Ok(()),
        }
    }

    /// Loads every student for the student pickers.
    pub async fn fetch_student_options(&mut self) -> AppResult<()> {
        self.student_options.begin();
        let result = ResourceApi::<Student>::new(self.gateway.clone())
            .list(
                &StudentFilter::default(),
                PageRequest::new(1, OPTIONS_PAGE_SIZE),
            )
            .await
            .map(|page| page.items);
        let locale = self.locale();
        match self.student_options.settle(result, locale) {
            Some(error) => Err(self.handle_error(error).await),
            None => Ok(()),
        }
    }

    /// Builds a list controller bound to the current session.
    #[must_use]
    pub fn list_controller<R: Resource>(
        &self,
        notifier: Arc<dyn Notifier>,
        confirmation: Arc<dyn Confirmation>,
    ) -> ListController<R> {
        ListController::new(
            ResourceApi::new(self.gateway.clone()),
            notifier,
            confirmation,
        )
    }

    /// Clears the session when `error` means it is no longer valid, and
    /// hands the error back.
    pub async fn handle_error(&mut self, error: AppError) -> AppError {
        if error.is_unauthorized() {
            self.expire_session().await;
        }
        error
    }

    async fn observe<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(error) => Err(self.handle_error(error).await),
        }
    }

    fn install_session(&mut self, session: AdminSession) {
        self.gateway = self
            .gateway
            .with_token(Some(session.token().to_owned()));
        self.session = Some(session);
    }

    async fn discard_stored_session(&self) {
        if let Err(error) = self.storage.remove(SESSION_STORAGE_KEY).await {
            warn!(error = %error, "failed to discard stored session");
        }
    }

    async fn expire_session(&mut self) {
        info!("session rejected by the server; signing out");
        if let Err(error) = self.clear_session().await {
            warn!(error = %error, "failed to remove expired session");
        }
    }

    async fn clear_session(&mut self) -> AppResult<()> {
        self.session = None;
        self.gateway = self.gateway.with_token(None);
        self.dashboard = DashboardState::default();
        self.teacher_options = Slice::default();
        self.student_options = Slice::default();
        self.storage.remove(SESSION_STORAGE_KEY).await
    }
}
