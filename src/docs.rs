use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use gurukul_core::pagination::{PaginationMeta, PaginationParams};
use gurukul_models::enums::{Board, ClassMode, FeeStatus};
use gurukul_models::Role;

use crate::modules::attendance::model::{
    AttendanceEntryDto, AttendanceRecord, AttendanceSummary, AttendanceWithStudent,
    SaveAttendanceDto,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto};
use crate::modules::batches::model::{Batch, BatchWithCount, CreateBatchDto, UpdateBatchDto};
use crate::modules::classes::controller::CompleteClassDto;
use crate::modules::classes::model::{ClassSession, CreateClassDto, UpdateClassDto};
use crate::modules::demo_bookings::model::{BookDemoDto, DemoBooking};
use crate::modules::events::model::{
    CreateEventDto, Event, EventForStudent, EventRegistration, RegistrationWithStudent,
    UpdateEventDto,
};
use crate::modules::fees::model::{CreateFeeDto, Fee, FeeTotals, FeeWithStudent, UpdateFeeDto};
use crate::modules::notes::model::{ClassNote, NoteResponse};
use crate::modules::notifications::model::{
    Notification, NotificationTarget, SendNotificationDto, SendNotificationResponse,
};
use crate::modules::profiles::model::{PaginatedProfilesResponse, Profile, UpdateProfileDto};
use crate::modules::roles::model::{AssignRoleDto, UserRolesResponse};
use crate::modules::students::model::{
    AssignBatchDto, EnrollStudentDto, StudentWithProfile, UpdateStudentDto,
};
use crate::modules::tasks::model::{
    CreateTaskDto, GradeSubmissionDto, SubmissionWithStudent, SubmitTaskDto, Task, TaskSubmission,
    TaskWithSubmission, UpdateTaskDto,
};
use crate::modules::testimonials::model::{
    CreateTestimonialDto, Testimonial, UpdateTestimonialDto,
};
use crate::modules::tests::model::{
    CreateTestDto, MarkEntryDto, SaveMarksDto, StudentMarkSummary, Test, TestMark,
    TestMarkWithStudent, UpdateTestDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::get_me,
        crate::modules::auth::controller::update_me,
        crate::modules::profiles::controller::get_profiles,
        crate::modules::profiles::controller::get_teachers,
        crate::modules::profiles::controller::get_profile,
        crate::modules::profiles::controller::update_profile,
        crate::modules::profiles::controller::delete_profile,
        crate::modules::roles::controller::get_user_roles,
        crate::modules::roles::controller::assign_role,
        crate::modules::roles::controller::revoke_role,
        crate::modules::batches::controller::create_batch,
        crate::modules::batches::controller::get_batches,
        crate::modules::batches::controller::get_batch,
        crate::modules::batches::controller::update_batch,
        crate::modules::batches::controller::delete_batch,
        crate::modules::students::controller::enroll_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_children,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::assign_batch,
        crate::modules::students::controller::delete_student,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::complete_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::attendance::controller::save_roster,
        crate::modules::attendance::controller::get_roster,
        crate::modules::attendance::controller::student_summary,
        crate::modules::fees::controller::create_fee,
        crate::modules::fees::controller::get_fees,
        crate::modules::fees::controller::get_totals,
        crate::modules::fees::controller::get_student_fees,
        crate::modules::fees::controller::update_fee,
        crate::modules::fees::controller::delete_fee,
        crate::modules::tests::controller::create_test,
        crate::modules::tests::controller::get_tests,
        crate::modules::tests::controller::update_test,
        crate::modules::tests::controller::delete_test,
        crate::modules::tests::controller::save_marks,
        crate::modules::tests::controller::get_marks,
        crate::modules::tests::controller::get_student_marks,
        crate::modules::tasks::controller::create_task,
        crate::modules::tasks::controller::get_tasks,
        crate::modules::tasks::controller::get_student_tasks,
        crate::modules::tasks::controller::update_task,
        crate::modules::tasks::controller::delete_task,
        crate::modules::tasks::controller::submit_task,
        crate::modules::tasks::controller::get_submissions,
        crate::modules::tasks::controller::grade_submission,
        crate::modules::notes::controller::upload_note,
        crate::modules::notes::controller::get_notes,
        crate::modules::notes::controller::delete_note,
        crate::modules::events::controller::create_event,
        crate::modules::events::controller::get_events,
        crate::modules::events::controller::get_my_events,
        crate::modules::events::controller::update_event,
        crate::modules::events::controller::delete_event,
        crate::modules::events::controller::register_for_event,
        crate::modules::events::controller::get_registrations,
        crate::modules::notifications::controller::send_notification,
        crate::modules::notifications::controller::get_notifications,
        crate::modules::notifications::controller::mark_notification_read,
        crate::modules::testimonials::controller::get_featured,
        crate::modules::testimonials::controller::get_testimonials,
        crate::modules::testimonials::controller::create_testimonial,
        crate::modules::testimonials::controller::update_testimonial,
        crate::modules::testimonials::controller::delete_testimonial,
        crate::modules::demo_bookings::controller::book_demo,
        crate::modules::demo_bookings::controller::get_demo_bookings,
        crate::realtime::stream_changes,
    ),
    components(
        schemas(
            Role,
            Board,
            ClassMode,
            FeeStatus,
            ErrorResponse,
            MessageResponse,
            LoginRequest,
            LoginResponse,
            RegisterRequestDto,
            Profile,
            UpdateProfileDto,
            PaginatedProfilesResponse,
            PaginationMeta,
            PaginationParams,
            AssignRoleDto,
            UserRolesResponse,
            Batch,
            BatchWithCount,
            CreateBatchDto,
            UpdateBatchDto,
            StudentWithProfile,
            EnrollStudentDto,
            UpdateStudentDto,
            AssignBatchDto,
            ClassSession,
            CreateClassDto,
            UpdateClassDto,
            CompleteClassDto,
            AttendanceRecord,
            AttendanceWithStudent,
            AttendanceEntryDto,
            SaveAttendanceDto,
            AttendanceSummary,
            Fee,
            FeeWithStudent,
            CreateFeeDto,
            UpdateFeeDto,
            FeeTotals,
            Test,
            TestMark,
            TestMarkWithStudent,
            CreateTestDto,
            UpdateTestDto,
            MarkEntryDto,
            SaveMarksDto,
            StudentMarkSummary,
            Task,
            TaskSubmission,
            SubmissionWithStudent,
            TaskWithSubmission,
            CreateTaskDto,
            UpdateTaskDto,
            SubmitTaskDto,
            GradeSubmissionDto,
            ClassNote,
            NoteResponse,
            Event,
            EventRegistration,
            RegistrationWithStudent,
            EventForStudent,
            CreateEventDto,
            UpdateEventDto,
            Notification,
            NotificationTarget,
            SendNotificationDto,
            SendNotificationResponse,
            Testimonial,
            CreateTestimonialDto,
            UpdateTestimonialDto,
            DemoBooking,
            BookDemoDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login, and profile of the current user"),
        (name = "Profiles", description = "Account management"),
        (name = "Roles", description = "Role registry management"),
        (name = "Batches", description = "Cohort management"),
        (name = "Students", description = "Enrollment and academic records"),
        (name = "Classes", description = "Class scheduling"),
        (name = "Attendance", description = "Roster saves and summaries"),
        (name = "Fees", description = "Fee records and totals"),
        (name = "Tests", description = "Tests and mark sheets"),
        (name = "Tasks", description = "Tasks, submissions, and grading"),
        (name = "Notes", description = "Class note uploads"),
        (name = "Events", description = "Events and registrations"),
        (name = "Notifications", description = "Notification fan-out and inbox"),
        (name = "Testimonials", description = "Public testimonials"),
        (name = "DemoBookings", description = "Demo class bookings"),
        (name = "Realtime", description = "Change-event stream")
    ),
    info(
        title = "Gurukul API",
        version = "0.1.0",
        description = "Tuition-center management API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
