//! API client: session protocol, error handling and the endpoint façade.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reqwest::header::{HeaderMap, SET_COOKIE};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, trace, warn};

use v4t_core::error::{AuthError, HttpError};
use v4t_core::model::{
    Course, CourseEdit, Exercise, ExerciseEdit, ExerciseUserInfo, FileInfo, Id, LoginResponse,
    ManageCourseUsers, ServerCommentThread, Shareable, User, UserSignup,
};
use v4t_core::{Credentials, Error, JwtToken, Notifier, Result, ServerUrl, XsrfToken};

use crate::classifier::{ErrorKind, ErrorReporter, Recovery, ReportState, Severity, Verdict};
use crate::current_user::CurrentUser;
use crate::endpoints;
use crate::request::{RequestDescriptor, ResponseKind, XSRF_COOKIE};
use crate::session::SessionStore;

/// Client for a V4T server.
///
/// Cheap to clone; clones share the session, the error report state and
/// the cached current user.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    session: SessionStore,
    reporter: Mutex<ErrorReporter>,
    current_user: CurrentUser,
    notifier: Arc<dyn Notifier>,
}

/// Reports a status description for as long as it is alive.
struct StatusGuard<'a> {
    notifier: &'a dyn Notifier,
    message: &'a str,
}

impl<'a> StatusGuard<'a> {
    fn new(notifier: &'a dyn Notifier, message: &'a str) -> Self {
        notifier.status_started(message);
        Self { notifier, message }
    }
}

impl Drop for StatusGuard<'_> {
    fn drop(&mut self) {
        self.notifier.status_finished(self.message);
    }
}

impl ApiClient {
    /// Create a client over `session`, reporting to `notifier`.
    pub fn new(session: SessionStore, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("v4t/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                session,
                reporter: Mutex::new(ErrorReporter::new()),
                current_user: CurrentUser::new(),
                notifier,
            }),
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn current_user(&self) -> &CurrentUser {
        &self.inner.current_user
    }

    /// Load the remembered session; see [`SessionStore::restore`].
    pub fn restore_session(&self) -> Result<bool> {
        self.inner.session.restore()
    }

    /// Forget tokens, server and the cached user.
    ///
    /// The in-memory session is cleared even when the file cannot be
    /// written; the write failure is shown to the user.
    pub fn invalidate_session(&self) {
        if let Err(e) = self.inner.session.invalidate() {
            warn!(error = %e, "Failed to persist invalidated session");
            self.inner
                .notifier
                .error(&format!("Could not save session: {}", e));
        }
        self.inner.current_user.reset();
    }

    /// Log out and send the tree back to the login prompt.
    pub fn logout(&self) -> Result<()> {
        let persisted = self.inner.session.invalidate();
        self.inner.current_user.reset();
        self.inner.notifier.reload_tree();
        persisted
    }

    // ========================================================================
    // Login / signup protocol
    // ========================================================================

    /// Log in, optionally switching to another server first.
    ///
    /// On success the session is persisted with `remember=true`, the current
    /// user is refreshed and the tree is reloaded. Failures are reported
    /// through the error classifier before being returned.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: &Credentials, url: Option<ServerUrl>) -> Result<User> {
        self.reported(self.try_login(credentials, url)).await
    }

    async fn try_login(&self, credentials: &Credentials, url: Option<ServerUrl>) -> Result<User> {
        if let Some(url) = url {
            self.invalidate_session();
            self.inner.session.set_base_url(url);
        }

        self.fetch_xsrf_token().await?;

        let descriptor = endpoints::login(credentials.username(), credentials.password())?;
        let response: LoginResponse = self
            .send_json(descriptor, "Logging in to VS Code 4 Teaching...")
            .await?;

        self.inner.notifier.info("Logged in");
        self.inner
            .session
            .set_jwt_token(JwtToken::new(response.jwt_token));
        self.inner.session.persist(true)?;
        self.reporter().reset();
        info!("Logged in");

        let user = self.update_user_info().await?;
        self.inner.notifier.reload_tree();
        Ok(user)
    }

    /// Register a user.
    ///
    /// Teacher signup is done by a logged-in teacher and leaves the session
    /// untouched; `url` is ignored. Student signup with `url` switches to that
    /// server and fetches an anti-forgery token first.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn signup(
        &self,
        user: &UserSignup,
        url: Option<ServerUrl>,
        is_teacher: bool,
    ) -> Result<User> {
        self.reported(self.try_signup(user, url, is_teacher)).await
    }

    async fn try_signup(
        &self,
        user: &UserSignup,
        url: Option<ServerUrl>,
        is_teacher: bool,
    ) -> Result<User> {
        if is_teacher {
            let created: User = self
                .send_json(
                    endpoints::register_teacher(user)?,
                    "Signing teacher up to VS Code 4 Teaching...",
                )
                .await?;
            self.inner.notifier.info("Teacher signed up successfully.");
            return Ok(created);
        }

        if let Some(url) = url {
            self.invalidate_session();
            self.inner.session.set_base_url(url);
            self.fetch_xsrf_token().await?;
        }

        let created: User = self
            .send_json(
                endpoints::register(user)?,
                "Signing up to VS Code 4 Teaching...",
            )
            .await?;
        self.inner.notifier.info("Signed up. Please log in.");
        Ok(created)
    }

    /// Fetch a fresh anti-forgery token and store it in the session.
    #[instrument(skip(self))]
    pub async fn fetch_xsrf_token(&self) -> Result<XsrfToken> {
        let _status = self.status("Fetching server info...");
        let response = self.dispatch(endpoints::csrf()).await?;
        let token = xsrf_token_from_headers(response.headers())?;
        self.inner.session.set_xsrf_token(token.clone());
        debug!("Anti-forgery token received");
        Ok(token)
    }

    /// Fetch the logged-in user and cache it.
    pub async fn update_user_info(&self) -> Result<User> {
        let user: User = self
            .send_json(endpoints::current_user(), "Fetching user data...")
            .await?;
        self.inner.current_user.set(user.clone());
        Ok(user)
    }

    // ========================================================================
    // Error handling
    // ========================================================================

    /// Report a failure to the user and apply its recovery.
    ///
    /// A stale anti-forgery token is re-fetched here; if that fetch fails in
    /// turn, its failure is reported the same way. A remembered session is
    /// saved again with the new token so the next process starts from it.
    /// Returns the kind of the original failure.
    pub async fn handle_error(&self, error: &Error) -> ErrorKind {
        let verdict = self.apply(error);
        let kind = verdict.kind;

        let mut recovery = verdict.recovery;
        while recovery == Recovery::RefreshXsrfToken {
            match self.fetch_xsrf_token().await {
                Ok(_) => {
                    self.persist_refreshed_token();
                    break;
                }
                Err(e) => recovery = self.apply(&e).recovery,
            }
        }

        kind
    }

    fn persist_refreshed_token(&self) {
        let session = &self.inner.session;
        if !session.snapshot().remember {
            return;
        }
        if let Err(e) = session.persist(true) {
            warn!(error = %e, "Failed to persist refreshed anti-forgery token");
            self.inner
                .notifier
                .error(&format!("Could not save session: {}", e));
        }
    }

    /// Await `operation`, reporting its failure before passing it on.
    pub async fn reported<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match operation.await {
            Ok(value) => Ok(value),
            Err(e) => {
                self.handle_error(&e).await;
                Err(e)
            }
        }
    }

    fn apply(&self, error: &Error) -> Verdict {
        let verdict = self.reporter().classify(error);
        debug!(kind = ?verdict.kind, recovery = ?verdict.recovery, %error, "Request failed");

        let notifier = &self.inner.notifier;
        match verdict.severity {
            Severity::Warning => notifier.warning(&verdict.message),
            Severity::Error => notifier.error(&verdict.message),
        }

        match verdict.recovery {
            Recovery::PromptLogin => {
                self.invalidate_session();
                notifier.reload_tree();
            }
            Recovery::Reset => self.invalidate_session(),
            Recovery::RefreshXsrfToken => {}
        }

        verdict
    }

    /// Snapshot of the 401 and 403 report states.
    pub fn report_states(&self) -> (ReportState, ReportState) {
        let reporter = self.reporter();
        (reporter.unauthorized(), reporter.forbidden())
    }

    fn reporter(&self) -> MutexGuard<'_, ErrorReporter> {
        self.inner
            .reporter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Users
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        self.send_json(endpoints::all_users(), "Fetching user data...")
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_users_in_course(&self, course_id: Id) -> Result<Vec<User>> {
        self.send_json(endpoints::course_users(course_id), "Fetching user data...")
            .await
    }

    #[instrument(skip(self))]
    pub async fn add_users_to_course(&self, course_id: Id, ids: Vec<Id>) -> Result<Course> {
        let body = ManageCourseUsers { ids };
        self.send_json(
            endpoints::add_users_to_course(course_id, &body)?,
            "Adding users to course...",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_users_from_course(&self, course_id: Id, ids: Vec<Id>) -> Result<Course> {
        let body = ManageCourseUsers { ids };
        self.send_json(
            endpoints::remove_users_from_course(course_id, &body)?,
            "Removing users from course...",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_creator(&self, course_id: Id) -> Result<User> {
        self.send_json(endpoints::course_creator(course_id), "Getting course info...")
            .await
    }

    /// Users that can still be added to a course.
    pub async fn users_not_in_course(&self, course_id: Id) -> Result<Vec<User>> {
        let users = self.get_all_users().await?;
        let in_course = self.get_users_in_course(course_id).await?;
        Ok(users
            .into_iter()
            .filter(|u| !in_course.iter().any(|c| c.id == u.id))
            .collect())
    }

    /// Users that can be removed from a course: everyone but its creator.
    pub async fn removable_users(&self, course_id: Id) -> Result<Vec<User>> {
        let in_course = self.get_users_in_course(course_id).await?;
        let creator = self.get_creator(course_id).await?;
        Ok(in_course
            .into_iter()
            .filter(|u| u.id != creator.id)
            .collect())
    }

    // ========================================================================
    // Courses
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn add_course(&self, name: &str) -> Result<Course> {
        let body = CourseEdit {
            name: name.to_string(),
        };
        self.send_json(endpoints::add_course(&body)?, "Creating course...")
            .await
    }

    #[instrument(skip(self))]
    pub async fn edit_course(&self, course_id: Id, name: &str) -> Result<Course> {
        let body = CourseEdit {
            name: name.to_string(),
        };
        self.send_json(endpoints::edit_course(course_id, &body)?, "Editing course...")
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_course(&self, course_id: Id) -> Result<()> {
        self.send_empty(endpoints::delete_course(course_id), "Deleting course...")
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_sharing_code(&self, target: Shareable) -> Result<String> {
        self.send_text(endpoints::sharing_code(target), "Fetching sharing code...")
            .await
    }

    /// Join a course with a sharing code and add it to the cached user.
    #[instrument(skip(self))]
    pub async fn get_course_with_code(&self, code: &str) -> Result<Course> {
        let course: Course = self
            .send_json(endpoints::course_with_code(code), "Fetching course data...")
            .await?;
        self.inner.current_user.add_new_course(course.clone());
        Ok(course)
    }

    // ========================================================================
    // Exercises
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn get_exercises(&self, course_id: Id) -> Result<Vec<Exercise>> {
        self.send_json(endpoints::course_exercises(course_id), "Fetching exercises...")
            .await
    }

    #[instrument(skip(self))]
    pub async fn add_exercise(&self, course_id: Id, name: &str) -> Result<Exercise> {
        let body = ExerciseEdit {
            name: name.to_string(),
        };
        self.send_json(
            endpoints::add_exercise(course_id, &body)?,
            "Adding exercise...",
        )
        .await
    }

    /// Create an exercise and upload its template.
    ///
    /// If the upload fails the exercise is deleted again and the upload
    /// error is returned.
    #[instrument(skip(self, template))]
    pub async fn add_exercise_with_template(
        &self,
        course_id: Id,
        name: &str,
        template: Vec<u8>,
    ) -> Result<Exercise> {
        let exercise = self.add_exercise(course_id, name).await?;
        if let Err(upload_error) = self.upload_exercise_template(exercise.id, template).await {
            warn!(exercise_id = exercise.id, error = %upload_error, "Template upload failed, removing exercise");
            self.delete_exercise(exercise.id).await?;
            return Err(upload_error);
        }
        Ok(exercise)
    }

    #[instrument(skip(self))]
    pub async fn edit_exercise(&self, exercise_id: Id, name: &str) -> Result<Exercise> {
        let body = ExerciseEdit {
            name: name.to_string(),
        };
        self.send_json(
            endpoints::edit_exercise(exercise_id, &body)?,
            "Sending exercise info...",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_exercise(&self, exercise_id: Id) -> Result<()> {
        self.send_empty(endpoints::delete_exercise(exercise_id), "Deleting exercise...")
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_exercise_user_info(&self, exercise_id: Id) -> Result<ExerciseUserInfo> {
        self.send_json(
            endpoints::exercise_user_info(exercise_id),
            "Fetching exercise info for current user...",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn update_exercise_user_info(
        &self,
        exercise_id: Id,
        finished: bool,
    ) -> Result<ExerciseUserInfo> {
        self.send_json(
            endpoints::update_exercise_user_info(exercise_id, finished)?,
            "Updating exercise user info...",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_all_students_exercise_user_info(
        &self,
        exercise_id: Id,
    ) -> Result<Vec<ExerciseUserInfo>> {
        self.send_json(
            endpoints::all_students_exercise_user_info(exercise_id),
            "Fetching students' exercise user info...",
        )
        .await
    }

    // ========================================================================
    // Files
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn get_exercise_files(&self, exercise_id: Id) -> Result<Vec<u8>> {
        self.send_bytes(
            endpoints::exercise_files(exercise_id),
            "Downloading exercise files...",
        )
        .await
    }

    #[instrument(skip(self, zip), fields(len = zip.len()))]
    pub async fn upload_files(&self, exercise_id: Id, zip: Vec<u8>) -> Result<serde_json::Value> {
        self.send_json(endpoints::upload_files(exercise_id, zip), "Uploading files...")
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_template(&self, exercise_id: Id) -> Result<Vec<u8>> {
        self.send_bytes(
            endpoints::template(exercise_id),
            "Downloading exercise template...",
        )
        .await
    }

    #[instrument(skip(self, zip), fields(len = zip.len()))]
    pub async fn upload_exercise_template(
        &self,
        exercise_id: Id,
        zip: Vec<u8>,
    ) -> Result<serde_json::Value> {
        self.send_json(
            endpoints::upload_template(exercise_id, zip),
            "Uploading template...",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_all_student_files(&self, exercise_id: Id) -> Result<Vec<u8>> {
        self.send_bytes(
            endpoints::all_student_files(exercise_id),
            "Downloading student files...",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_files_info(&self, username: &str, exercise_id: Id) -> Result<Vec<FileInfo>> {
        self.send_json(
            endpoints::files_info(username, exercise_id),
            "Fetching file information...",
        )
        .await
    }

    // ========================================================================
    // Comments
    // ========================================================================

    #[instrument(skip(self, thread))]
    pub async fn save_comment(
        &self,
        file_id: Id,
        thread: &ServerCommentThread,
    ) -> Result<ServerCommentThread> {
        self.send_json(endpoints::save_comment(file_id, thread)?, "Saving comments...")
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_comments(&self, file_id: Id) -> Result<Vec<ServerCommentThread>> {
        self.send_optional_json(endpoints::comments(file_id), "Fetching comments...")
            .await
            .map(Option::unwrap_or_default)
    }

    #[instrument(skip(self))]
    pub async fn get_all_comments(&self, username: &str, exercise_id: Id) -> Result<Vec<FileInfo>> {
        self.send_optional_json(
            endpoints::all_comments(username, exercise_id),
            "Fetching comments...",
        )
        .await
        .map(Option::unwrap_or_default)
    }

    #[instrument(skip(self, line_text))]
    pub async fn update_comment_thread_line(
        &self,
        thread_id: Id,
        line: u32,
        line_text: &str,
    ) -> Result<ServerCommentThread> {
        self.send_json(
            endpoints::update_comment_thread_line(thread_id, line, line_text)?,
            "Saving comments...",
        )
        .await
    }

    // ========================================================================
    // Transport
    // ========================================================================

    fn status<'a>(&'a self, message: &'a str) -> StatusGuard<'a> {
        StatusGuard::new(self.inner.notifier.as_ref(), message)
    }

    /// Build and send a request, turning error statuses into [`HttpError`].
    async fn dispatch(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response> {
        let config = self.inner.session.build_request_config(&descriptor)?;
        debug!(method = %config.method, url = %config.url, "Sending request");
        let request = config.into_request(&self.inner.http)?;

        let response = self.inner.http.execute(request).await?;
        let status = response.status();
        trace!(status = %status, "Response");

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(HttpError::from_body(status.as_u16(), &body).into())
        }
    }

    async fn send_json<R: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
        status: &str,
    ) -> Result<R> {
        expect_kind(&descriptor, ResponseKind::Json)?;
        let _status = self.status(status);
        let response = self.dispatch(descriptor).await?;
        Ok(response.json::<R>().await?)
    }

    /// Like [`Self::send_json`], but an empty body yields `None`.
    async fn send_optional_json<R: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
        status: &str,
    ) -> Result<Option<R>> {
        expect_kind(&descriptor, ResponseKind::Json)?;
        let _status = self.status(status);
        let response = self.dispatch(descriptor).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn send_bytes(&self, descriptor: RequestDescriptor, status: &str) -> Result<Vec<u8>> {
        expect_kind(&descriptor, ResponseKind::Binary)?;
        let _status = self.status(status);
        let response = self.dispatch(descriptor).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Text payloads may arrive JSON-quoted; the quotes are removed.
    async fn send_text(&self, descriptor: RequestDescriptor, status: &str) -> Result<String> {
        expect_kind(&descriptor, ResponseKind::Text)?;
        let _status = self.status(status);
        let response = self.dispatch(descriptor).await?;
        let text = response.text().await?;
        Ok(match serde_json::from_str::<String>(&text) {
            Ok(unquoted) => unquoted,
            Err(_) => text,
        })
    }

    async fn send_empty(&self, descriptor: RequestDescriptor, status: &str) -> Result<()> {
        let _status = self.status(status);
        self.dispatch(descriptor).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

/// Refuse to read a response differently from what its endpoint returns.
fn expect_kind(descriptor: &RequestDescriptor, expected: ResponseKind) -> Result<()> {
    if descriptor.response_kind == expected {
        return Ok(());
    }
    Err(Error::Request {
        message: format!(
            "{} {} returns {:?}, read as {:?}",
            descriptor.method, descriptor.path, descriptor.response_kind, expected
        ),
    })
}

/// Extract the `XSRF-TOKEN` cookie value from `Set-Cookie` headers.
///
/// The value runs up to the first `;`. Missing headers, a missing cookie or
/// an empty value all fail with [`AuthError::MissingAntiForgeryToken`].
pub fn xsrf_token_from_headers(headers: &HeaderMap) -> Result<XsrfToken> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == XSRF_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(XsrfToken::new)
        .ok_or_else(|| AuthError::MissingAntiForgeryToken.into())
}
