//! Domain records, filters, drafts and client-side validation.

#![forbid(unsafe_code)]

mod billing;
mod catalog;
mod dashboard;
mod lenient;
mod localized;
mod pagination;
mod payload;
mod people;
mod recognition;
mod registration;
mod requests;
mod resource;
mod status;
mod upload;

pub use billing::{
    PaymentReceipt, PaymentReceiptDraft, ReceiptFilter, SalaryCalculation, SalaryDraft,
    SalaryFilter, validate_month,
};
pub use catalog::{
    Feature, FeatureDraft, Lesson, LessonDraft, Package, PackageDraft, PackageFilter,
    PublishedFilter, SearchFilter, Testimonial, TestimonialDraft,
};
pub use dashboard::DashboardStats;
pub use localized::{LocalizedText, localized};
pub use pagination::{PageRequest, Pagination, PaginationControls};
pub use payload::{FilePart, MultipartForm, RequestBody};
pub use people::{
    Student, StudentDraft, StudentFilter, Supervisor, SupervisorDraft, SupervisorFilter, Teacher,
    TeacherDraft, TeacherFilter,
};
pub use recognition::{
    Certificate, CertificateDraft, CertificateFilter, HonorBoardDraft, HonorBoardEntry,
    HonorBoardFilter,
};
pub use registration::{REGISTRATION_AGE_RANGE, RegistrationForm};
pub use requests::{
    Complaint, ComplaintDraft, ComplaintFilter, ReviewDecision, ReviewFilter,
    ScheduleChangeDraft, ScheduleChangeRequest, SubscriptionPause, SubscriptionPauseDraft,
};
pub use resource::{
    DraftMode, PackageRef, PersonRef, Resource, ResourceDraft, ResourceFilter, is_plausible_email,
};
pub use status::{AccountStatus, ComplaintStatus, Gender, ReviewStatus, SalaryStatus};
pub use upload::{MAX_IMAGE_BYTES, MAX_VIDEO_BYTES, UploadKind, validate_upload};
