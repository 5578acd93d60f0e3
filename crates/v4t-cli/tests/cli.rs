//! CLI tests against a mock V4T server.
//!
//! Each test runs the built binary with its own session file.

mod common;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli, run_cli_failure, run_cli_success, session_file, write_session};

fn teacher_json() -> serde_json::Value {
    json!({
        "id": 1,
        "username": "teacher1",
        "name": "Ada",
        "lastName": "Lovelace",
        "roles": [{"roleName": "ROLE_STUDENT"}, {"roleName": "ROLE_TEACHER"}],
        "courses": [
            {"id": 1, "name": "Algorithms", "exercises": []},
            {"id": 2, "name": "Compilers", "exercises": []}
        ]
    })
}

async fn mount_current_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/currentuser"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(teacher_json()))
        .mount(server)
        .await;
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(&["--version"], &session_file(dir.path()));
    assert!(stdout.starts_with("v4t "));
}

#[test]
fn test_whoami_without_session() {
    let dir = TempDir::new().unwrap();
    let stderr = run_cli_failure(&["whoami"], &session_file(dir.path()));
    assert!(stderr.contains("No active session. Run 'v4t login' first."));
    assert!(stderr.contains("no active session"));
}

#[test]
fn test_tree_without_session() {
    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(&["tree"], &session_file(dir.path()));
    assert_eq!(stdout, "Login\nSign up\n");
}

#[test]
fn test_invalid_server_url() {
    let dir = TempDir::new().unwrap();
    let stderr = run_cli_failure(
        &[
            "login",
            "--username",
            "teacher1",
            "--password",
            "secret",
            "--server",
            "ftp://example.com",
        ],
        &session_file(dir.path()),
    );
    assert!(stderr.contains("Invalid server URL"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_then_whoami() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/csrf"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "XSRF-TOKEN=xsrf-1; Path=/"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"username": "teacher1", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jwtToken": "jwt-1"})))
        .mount(&server)
        .await;

    mount_current_user(&server).await;

    let dir = TempDir::new().unwrap();
    let session = session_file(dir.path());

    let output = run_cli(
        &[
            "login",
            "--username",
            "teacher1",
            "--password",
            "secret",
            "--server",
            &server.uri(),
        ],
        &session,
    );
    assert!(
        output.status.success(),
        "Login failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Logged in as teacher1"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Logged in"));

    let record = std::fs::read_to_string(&session).unwrap();
    assert!(record.starts_with("jwt-1\nxsrf-1\n"));
    assert!(record.ends_with("\ntrue"));

    let stdout = run_cli_success(&["whoami"], &session);
    assert!(stdout.contains("teacher1"));
    assert!(stdout.contains("Ada Lovelace (Teacher)"));
    assert!(stdout.contains("Role: teacher"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_reuses_last_server_without_old_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/csrf"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "XSRF-TOKEN=xsrf-1; Path=/"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jwtToken": "jwt-1"})))
        .mount(&server)
        .await;

    mount_current_user(&server).await;

    let dir = TempDir::new().unwrap();
    let session = session_file(dir.path());
    std::fs::create_dir_all(session.parent().unwrap()).unwrap();
    std::fs::write(
        &session,
        format!("expired-jwt\nstale-xsrf\n{}\nfalse", server.uri()),
    )
    .unwrap();

    let stdout = run_cli_success(
        &["login", "--username", "teacher1", "--password", "secret"],
        &session,
    );
    assert!(stdout.contains("Logged in as teacher1"));

    let requests = server.received_requests().await.unwrap();
    let login = requests
        .iter()
        .find(|request| request.url.path() == "/api/login")
        .unwrap();
    assert!(!login.headers.contains_key("authorization"));
    assert_eq!(login.headers.get("x-xsrf-token").unwrap(), "xsrf-1");

    let csrf = requests
        .iter()
        .find(|request| request.url.path() == "/api/csrf")
        .unwrap();
    assert!(!csrf.headers.contains_key("authorization"));

    let record = std::fs::read_to_string(&session).unwrap();
    assert_eq!(record, format!("jwt-1\nxsrf-1\n{}\ntrue", server.uri()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_student_signup_reuses_last_server_without_old_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/csrf"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "XSRF-TOKEN=xsrf-1; Path=/"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7,
            "username": "student7",
            "roles": [{"roleName": "ROLE_STUDENT"}]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let session = session_file(dir.path());
    write_session(&session, &server.uri());

    let stdout = run_cli_success(
        &[
            "signup",
            "--username",
            "student7",
            "--password",
            "secret",
            "--email",
            "student7@example.com",
            "--name",
            "Sam",
            "--last-name",
            "Rivera",
        ],
        &session,
    );
    assert!(stdout.contains("Created user student7"));

    let requests = server.received_requests().await.unwrap();
    let register = requests
        .iter()
        .find(|request| request.url.path() == "/api/register")
        .unwrap();
    assert!(!register.headers.contains_key("authorization"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_forgets_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let session = session_file(dir.path());
    write_session(&session, &server.uri());

    let stdout = run_cli_success(&["logout"], &session);
    assert!(stdout.contains("Logged out"));

    let record = std::fs::read_to_string(&session).unwrap();
    assert!(record.ends_with("\nfalse"));

    let stderr = run_cli_failure(&["course", "list"], &session);
    assert!(stderr.contains("No active session"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tree_for_teacher() {
    let server = MockServer::start().await;
    mount_current_user(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/courses/1/exercises"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 10, "name": "Sorting"}])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/courses/2/exercises"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let session = session_file(dir.path());
    write_session(&session, &server.uri());

    let stdout = run_cli_success(&["tree", "--expand"], &session);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Get course with code",
            "Add course",
            "Algorithms #1",
            "  Sorting #10",
            "Compilers #2",
            "  No exercises available",
            "Sign up a new teacher",
            "Logout",
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_course_list() {
    let server = MockServer::start().await;
    mount_current_user(&server).await;

    let dir = TempDir::new().unwrap();
    let session = session_file(dir.path());
    write_session(&session, &server.uri());

    let stdout = run_cli_success(&["course", "list", "--json"], &session);
    let names: Vec<String> = stdout
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .map(|course| course["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Algorithms", "Compilers"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_exercise_template_download() {
    let server = MockServer::start().await;
    let zip = vec![0x50, 0x4b, 0x05, 0x06, 0x00, 0x00];

    Mock::given(method("GET"))
        .and(path("/api/exercises/10/files/template"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(zip.clone()))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let session = session_file(dir.path());
    write_session(&session, &server.uri());
    let target = dir.path().join("out").join("template.zip");

    run_cli_success(
        &[
            "exercise",
            "template",
            "10",
            "--output",
            target.to_str().unwrap(),
        ],
        &session,
    );
    assert_eq!(std::fs::read(&target).unwrap(), zip);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_prompts_login() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/1/exercises"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let session = session_file(dir.path());
    write_session(&session, &server.uri());

    let stderr = run_cli_failure(&["exercise", "list", "1"], &session);
    assert!(stderr.contains("It seems that we couldn't log in, please log in."));

    let record = std::fs::read_to_string(&session).unwrap();
    assert!(record.ends_with("\nfalse"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_users_rejects_existing_member() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "username": "teacher1"},
            {"id": 2, "username": "student1"},
            {"id": 3, "username": "student2"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/courses/1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "username": "teacher1"},
            {"id": 2, "username": "student1"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/courses/1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Algorithms"})))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let session = session_file(dir.path());
    write_session(&session, &server.uri());

    let stdout = run_cli_success(&["course", "add-users", "1"], &session);
    assert!(stdout.contains("student2"));
    assert!(!stdout.contains("student1"));

    let stderr = run_cli_failure(&["course", "add-users", "1", "--user", "2"], &session);
    assert!(stderr.contains("User 2 cannot be selected"));
}
