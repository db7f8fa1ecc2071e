use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::{
    App, HttpResponse,
    http::{StatusCode, header},
    test, web,
};

use inventory_console::domain::session::{AuthGrant, SessionContext, SessionStore, SessionUser};
use inventory_console::domain::types::{UserEmail, UserId};
use inventory_console::middleware::RedirectUnauthorized;
use inventory_console::routes::books::filter_books;
use inventory_console::session::CookieSession;

async fn sign_in(session: Session) -> HttpResponse {
    let grant = AuthGrant {
        user: SessionUser {
            id: UserId::new("u-1").unwrap(),
            email: UserEmail::new("ana@example.com").unwrap(),
            name: Some("Ana".to_string()),
            roles: Vec::new(),
        },
        access_token: "token".to_string(),
    };
    CookieSession::new(session)
        .save(&SessionContext::default().login(grant))
        .unwrap();
    HttpResponse::Ok().finish()
}

macro_rules! filter_app {
    () => {
        test::init_service(
            App::new()
                .wrap(SessionMiddleware::new(
                    CookieSessionStore::default(),
                    Key::from(&[7u8; 64]),
                ))
                .route("/sign-in", web::get().to(sign_in))
                .service(web::scope("").wrap(RedirectUnauthorized).service(filter_books)),
        )
        .await
    };
}

async fn filter_location(uri: &str) -> String {
    let app = filter_app!();

    let req = test::TestRequest::get().uri("/sign-in").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie: Cookie<'static> = resp
        .response()
        .cookies()
        .next()
        .expect("session cookie is set")
        .into_owned();

    let req = test::TestRequest::get().uri(uri).cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    resp.headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

#[actix_web::test]
async fn changing_a_filter_drops_the_page() {
    let location = filter_location("/books/filter?search=old&page=3&key=search&value=dune").await;
    assert_eq!(location, "/books?search=dune");
}

#[actix_web::test]
async fn changing_the_page_keeps_the_filters() {
    let location = filter_location("/books/filter?search=old&page=3&key=page&value=4").await;
    assert_eq!(location, "/books?search=old&page=4");
}

#[actix_web::test]
async fn clearing_a_select_with_all_removes_it() {
    let location = filter_location(
        "/books/filter?search=old&authorId=7b0f6a3e-3a43-4f4e-9d0c-1c2b3d4e5f60&page=2&key=authorId&value=all",
    )
    .await;
    assert_eq!(location, "/books?search=old");
}

#[actix_web::test]
async fn filter_without_a_session_goes_to_login() {
    let app = filter_app!();

    let req = test::TestRequest::get()
        .uri("/books/filter?key=search&value=dune")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/auth/login"
    );
}
