//! API integration tests
//!
//! Every test boots its own server on in-memory storage, so no external
//! services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, refresh_cookie, Session, TestServer,
};
use reqwest::{Method, StatusCode};
use uuid::Uuid;

async fn create_blog(server: &TestServer) -> BlogResponse {
    let response = server
        .admin(Method::POST, "/blogs")
        .json(&CreateBlogRequest::unique())
        .send()
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_post(server: &TestServer, blog: &BlogResponse) -> PostResponse {
    let response = server
        .admin(Method::POST, &format!("/blogs/{}/posts", blog.id))
        .json(&CreatePostRequest::unique())
        .send()
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn new_session(server: &TestServer) -> Session {
    server
        .register_and_login(&RegisterRequest::unique())
        .await
        .unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");

    let response = server.get("/health/live").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_registration_confirmation_and_me() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();

    let session = server.register_and_login(&request).await.unwrap();

    let response = server.get_auth("/auth/me", &session.access_token).await.unwrap();
    let me: MeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.login, request.login);
    assert_eq!(me.email, request.email);
}

#[tokio::test]
async fn test_login_requires_confirmed_email() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();

    let response = server.post("/auth/registration", &request).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post("/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_registration_duplicate_login_reports_field() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();

    let response = server.post("/auth/registration", &request).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let duplicate = RegisterRequest {
        email: format!("other{}@example.com", unique_suffix()),
        ..request.clone()
    };
    let response = server.post("/auth/registration", &duplicate).await.unwrap();
    let errors: FieldErrors = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(errors.fields(), vec!["login"]);
}

#[tokio::test]
async fn test_confirmation_with_unknown_code_is_rejected() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post(
            "/auth/registration-confirmation",
            &serde_json::json!({ "code": Uuid::new_v4().to_string() }),
        )
        .await
        .unwrap();
    let errors: FieldErrors = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(errors.fields(), vec!["code"]);
}

#[tokio::test]
async fn test_resending_issues_a_fresh_code() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();

    server.post("/auth/registration", &request).await.unwrap();
    let first = server.mailer.last_to(&request.email).unwrap();

    let response = server
        .post(
            "/auth/registration-email-resending",
            &serde_json::json!({ "email": request.email }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let second = server.mailer.last_to(&request.email).unwrap();
    assert_ne!(first.code(), second.code());

    // the superseded code no longer confirms
    let response = server
        .post(
            "/auth/registration-confirmation",
            &serde_json::json!({ "code": first.code().unwrap() }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rotates_and_rejects_reuse() {
    let server = TestServer::start().await.unwrap();
    let session = new_session(&server).await;

    let response = server
        .with_cookie(Method::POST, "/auth/refresh-token", &session.refresh_token)
        .send()
        .await
        .unwrap();
    let rotated = refresh_cookie(&response).unwrap();
    let body: AccessToken = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.access_token.is_empty());
    assert_ne!(rotated, session.refresh_token);

    // replaying the old token kills the session
    let response = server
        .with_cookie(Method::POST, "/auth/refresh-token", &session.refresh_token)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .with_cookie(Method::POST, "/auth/refresh-token", &rotated)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_without_cookie_is_unauthorized() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .request(Method::POST, "/auth/refresh-token")
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let server = TestServer::start().await.unwrap();
    let session = new_session(&server).await;

    let response = server
        .with_cookie(Method::POST, "/auth/logout", &session.refresh_token)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .with_cookie(Method::POST, "/auth/refresh-token", &session.refresh_token)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_password_recovery_sets_new_password() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();
    server.register_and_login(&request).await.unwrap();

    let response = server
        .post(
            "/auth/password-recovery",
            &serde_json::json!({ "email": request.email }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let code = server
        .mailer
        .last_to(&request.email)
        .and_then(|mail| mail.code().map(str::to_string))
        .unwrap();
    let response = server
        .post(
            "/auth/new-password",
            &serde_json::json!({ "newPassword": "changed99", "recoveryCode": code }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post("/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let changed = RegisterRequest {
        password: "changed99".to_string(),
        ..request
    };
    server.login(&changed, "integration-tests").await.unwrap();
}

#[tokio::test]
async fn test_password_recovery_for_unknown_email_is_silent() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post(
            "/auth/password-recovery",
            &serde_json::json!({ "email": "nobody@example.com" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    assert!(server.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_me_requires_bearer_token() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/auth/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/auth/me", "not-a-jwt").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Device Tests
// ============================================================================

#[tokio::test]
async fn test_devices_listing_and_termination() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();
    let laptop = server.register_and_login(&request).await.unwrap();
    let phone = server.login(&request, "phone").await.unwrap();
    let tablet = server.login(&request, "tablet").await.unwrap();

    let response = server
        .with_cookie(Method::GET, "/security/devices", &laptop.refresh_token)
        .send()
        .await
        .unwrap();
    let devices: Vec<DeviceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(devices.len(), 3);
    assert!(devices.iter().any(|d| d.title == "phone"));
    assert!(devices.iter().all(|d| d.ip == "127.0.0.1"));

    // terminate the tablet from the phone
    let tablet_id = devices
        .iter()
        .find(|d| d.title == "tablet")
        .map(|d| d.device_id)
        .unwrap();
    let response = server
        .with_cookie(
            Method::DELETE,
            &format!("/security/devices/{tablet_id}"),
            &phone.refresh_token,
        )
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .with_cookie(Method::POST, "/auth/refresh-token", &tablet.refresh_token)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // then everything except the laptop
    let response = server
        .with_cookie(Method::DELETE, "/security/devices", &laptop.refresh_token)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .with_cookie(Method::GET, "/security/devices", &laptop.refresh_token)
        .send()
        .await
        .unwrap();
    let devices: Vec<DeviceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(devices.len(), 1);
}

#[tokio::test]
async fn test_cannot_terminate_another_users_device() {
    let server = TestServer::start().await.unwrap();
    let alice = new_session(&server).await;
    let bob = new_session(&server).await;

    let response = server
        .with_cookie(Method::GET, "/security/devices", &bob.refresh_token)
        .send()
        .await
        .unwrap();
    let devices: Vec<DeviceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let bob_device = devices[0].device_id;

    let response = server
        .with_cookie(
            Method::DELETE,
            &format!("/security/devices/{bob_device}"),
            &alice.refresh_token,
        )
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .with_cookie(
            Method::DELETE,
            &format!("/security/devices/{}", Uuid::new_v4()),
            &alice.refresh_token,
        )
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_basic_auth() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/blogs", &CreateBlogRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .request(Method::POST, "/blogs")
        .basic_auth("admin", Some("wrong"))
        .json(&CreateBlogRequest::unique())
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get("/users").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_admin_user_management() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();

    let response = server
        .admin(Method::POST, "/users")
        .json(&request)
        .send()
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(user.login, request.login);

    // admin-created users can log in right away
    server.login(&request, "integration-tests").await.unwrap();

    let response = server
        .admin(
            Method::GET,
            &format!("/users?searchLoginTerm={}", request.login.to_uppercase()),
        )
        .send()
        .await
        .unwrap();
    let page: Page<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].email, request.email);

    let response = server
        .admin(Method::DELETE, &format!("/users/{}", user.id))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .admin(Method::DELETE, &format!("/users/{}", user.id))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Blog and Post Tests
// ============================================================================

#[tokio::test]
async fn test_blog_validation_reports_every_field() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .admin(Method::POST, "/blogs")
        .json(&serde_json::json!({
            "name": "   ",
            "description": "ok",
            "websiteUrl": "not a url",
        }))
        .send()
        .await
        .unwrap();
    let errors: FieldErrors = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(errors.fields(), vec!["name", "websiteUrl"]);

    let response = server
        .admin(Method::POST, "/blogs")
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    let errors: FieldErrors = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(errors.fields(), vec!["description", "name", "websiteUrl"]);
}

#[tokio::test]
async fn test_blog_crud_and_blog_posts() {
    let server = TestServer::start().await.unwrap();
    let blog = create_blog(&server).await;
    assert!(!blog.is_membership);

    let post = create_post(&server, &blog).await;
    assert_eq!(post.blog_id, blog.id);
    assert_eq!(post.blog_name, blog.name);
    assert_eq!(post.extended_likes_info.my_status, "None");

    let response = server
        .admin(Method::PUT, &format!("/blogs/{}", blog.id))
        .json(&serde_json::json!({
            "name": "renamed",
            "description": "new description",
            "websiteUrl": blog.website_url,
        }))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/blogs/{}/posts", blog.id))
        .await
        .unwrap();
    let page: Page<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].blog_name, "renamed");

    let response = server
        .admin(Method::DELETE, &format!("/blogs/{}", blog.id))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("/blogs/{}", blog.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_blog_listing_pages_and_searches() {
    let server = TestServer::start().await.unwrap();
    for _ in 0..3 {
        create_blog(&server).await;
    }

    let response = server
        .get("/blogs?pageSize=2&pageNumber=2&sortDirection=asc")
        .await
        .unwrap();
    let page: Page<BlogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total_count, 3);
    assert_eq!(page.pages_count, 2);
    assert_eq!(page.page, 2);
    assert_eq!(page.page_size, 2);
    assert_eq!(page.items.len(), 1);

    let response = server.get("/blogs?searchNameTerm=nothing-like-this").await.unwrap();
    let page: Page<BlogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total_count, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let server = TestServer::start().await.unwrap();

    let response = server.get(&format!("/posts/{}", Uuid::new_v4())).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get("/posts/not-a-uuid").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get(&format!("/blogs/{}/posts", Uuid::new_v4()))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_post_with_unknown_blog_reports_blog_id() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .admin(Method::POST, "/posts")
        .json(&serde_json::json!({
            "title": "title",
            "shortDescription": "summary",
            "content": "content",
            "blogId": Uuid::new_v4(),
        }))
        .send()
        .await
        .unwrap();
    let errors: FieldErrors = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(errors.fields(), vec!["blogId"]);
}

// ============================================================================
// Like Tests
// ============================================================================

#[tokio::test]
async fn test_post_likes_project_per_viewer() {
    let server = TestServer::start().await.unwrap();
    let post = create_post(&server, &create_blog(&server).await).await;
    let alice = new_session(&server).await;
    let bob = new_session(&server).await;
    let path = format!("/posts/{}/like-status", post.id);

    let response = server
        .put_auth(&path, &alice.access_token, &like_body("Like"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    let response = server
        .put_auth(&path, &bob.access_token, &like_body("Dislike"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/posts/{}", post.id), &alice.access_token)
        .await
        .unwrap();
    let seen: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let info = seen.extended_likes_info;
    assert_eq!((info.likes_count, info.dislikes_count), (1, 1));
    assert_eq!(info.my_status, "Like");
    assert_eq!(info.newest_likes.len(), 1);
    assert_eq!(info.newest_likes[0].login, alice.login);

    let response = server.get(&format!("/posts/{}", post.id)).await.unwrap();
    let anonymous: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(anonymous.extended_likes_info.my_status, "None");

    // moving to the other bucket and back to none
    server
        .put_auth(&path, &alice.access_token, &like_body("Dislike"))
        .await
        .unwrap();
    server
        .put_auth(&path, &bob.access_token, &like_body("None"))
        .await
        .unwrap();

    let response = server
        .get_auth(&format!("/posts/{}", post.id), &bob.access_token)
        .await
        .unwrap();
    let seen: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let info = seen.extended_likes_info;
    assert_eq!((info.likes_count, info.dislikes_count), (0, 1));
    assert_eq!(info.my_status, "None");
    assert!(info.newest_likes.is_empty());
}

#[tokio::test]
async fn test_like_status_validation_and_auth() {
    let server = TestServer::start().await.unwrap();
    let post = create_post(&server, &create_blog(&server).await).await;
    let alice = new_session(&server).await;
    let path = format!("/posts/{}/like-status", post.id);

    let response = server
        .request(Method::PUT, &path)
        .json(&like_body("Like"))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .put_auth(&path, &alice.access_token, &like_body("Love"))
        .await
        .unwrap();
    let errors: FieldErrors = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(errors.fields(), vec!["likeStatus"]);

    let response = server
        .put_auth(
            &format!("/posts/{}/like-status", Uuid::new_v4()),
            &alice.access_token,
            &like_body("Like"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle_and_ownership() {
    let server = TestServer::start().await.unwrap();
    let post = create_post(&server, &create_blog(&server).await).await;
    let alice = new_session(&server).await;
    let bob = new_session(&server).await;

    let response = server
        .post_auth(
            &format!("/posts/{}/comments", post.id),
            &alice.access_token,
            &comment_body("a comment that is long enough"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.commentator_info.user_login, alice.login);
    assert_eq!(comment.likes_info.my_status, "None");

    let path = format!("/comments/{}", comment.id);
    let response = server
        .put_auth(&path, &bob.access_token, &comment_body("bob rewrites this comment"))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    let response = server.delete_auth(&path, &bob.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(&path, &alice.access_token, &comment_body("alice edits her own comment"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .put_auth(
            &format!("{path}/like-status"),
            &bob.access_token,
            &like_body("Like"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&path, &bob.access_token).await.unwrap();
    let seen: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(seen.content, "alice edits her own comment");
    assert_eq!(seen.likes_info.likes_count, 1);
    assert_eq!(seen.likes_info.my_status, "Like");

    let response = server
        .get(&format!("/posts/{}/comments", post.id))
        .await
        .unwrap();
    let page: Page<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].likes_info.my_status, "None");

    let response = server.delete_auth(&path, &alice.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_short_comment_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let post = create_post(&server, &create_blog(&server).await).await;
    let alice = new_session(&server).await;

    let response = server
        .post_auth(
            &format!("/posts/{}/comments", post.id),
            &alice.access_token,
            &comment_body("too short"),
        )
        .await
        .unwrap();
    let errors: FieldErrors = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(errors.fields(), vec!["content"]);
}

#[tokio::test]
async fn test_comment_edit_checks_owner_before_content() {
    let server = TestServer::start().await.unwrap();
    let post = create_post(&server, &create_blog(&server).await).await;
    let alice = new_session(&server).await;
    let bob = new_session(&server).await;

    let response = server
        .post_auth(
            &format!("/posts/{}/comments", post.id),
            &alice.access_token,
            &comment_body("a comment that is long enough"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put_auth(
            &format!("/comments/{}", comment.id),
            &bob.access_token,
            &comment_body("short"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(
            &format!("/comments/{}", Uuid::new_v4()),
            &bob.access_token,
            &comment_body("short"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .put_auth(
            &format!("/comments/{}", comment.id),
            &alice.access_token,
            &comment_body("short"),
        )
        .await
        .unwrap();
    let errors: FieldErrors = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(errors.fields(), vec!["content"]);
}

// ============================================================================
// Testing Reset
// ============================================================================

#[tokio::test]
async fn test_clear_all_data() {
    let server = TestServer::start().await.unwrap();
    create_post(&server, &create_blog(&server).await).await;
    let alice = new_session(&server).await;

    let response = server
        .request(Method::DELETE, "/testing/all-data")
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get("/blogs").await.unwrap();
    let page: Page<BlogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total_count, 0);

    let response = server
        .with_cookie(Method::POST, "/auth/refresh-token", &alice.refresh_token)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}
