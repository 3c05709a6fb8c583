//! API integration tests
//!
//! These run against a live server with a reachable database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so tests can be re-run against the same database
fn unique() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos()
        .to_string()
}

/// Register a fresh account and return its bearer token
async fn get_auth_token(client: &Client) -> String {
    let email = format!("librarian-{}@acervo.test", unique());

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": "Test Librarian",
            "email": email,
            "password": "senha123"
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "senha123"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn create_book(client: &Client, token: &str, title: &str, author: &str, stock: i32) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": title,
            "author": author,
            "isbn": format!("isbn-{}", unique()),
            "stock": stock
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse book response");
    body["id"].as_i64().expect("No book id")
}

async fn create_client_record(client: &Client, token: &str, name: &str) -> i64 {
    let response = client
        .post(format!("{}/clients", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": name,
            "national_id": format!("cpf-{}", unique())
        }))
        .send()
        .await
        .expect("Failed to create client");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse client response");
    body["id"].as_i64().expect("No client id")
}

async fn lend(client: &Client, token: &str, client_id: i64, book_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "client_id": client_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send loan request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "nobody@acervo.test",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_email_conflicts() {
    let client = Client::new();
    let email = format!("dup-{}@acervo.test", unique());
    let payload = json!({
        "name": "Dup",
        "email": email,
        "password": "senha123"
    });

    let first = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_books_require_authentication() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_book_search_is_case_insensitive_substring() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let marker = format!("Potter {}", unique());
    create_book(&client, &token, &format!("Harry {}", marker), "J. K. Rowling", 2).await;
    create_book(&client, &token, "1984", "George Orwell", 2).await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("q", marker.to_lowercase())])
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected array");

    assert_eq!(books.len(), 1);
    assert!(books[0]["title"].as_str().unwrap().contains(&marker));
    assert_eq!(books[0]["availability"], "Available");
}

#[tokio::test]
#[ignore]
async fn test_book_search_treats_like_metacharacters_literally() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let marker = unique();
    create_book(&client, &token, &format!("snake_case {}", marker), "Author", 1).await;
    create_book(&client, &token, &format!("snakeXcase {}", marker), "Author", 1).await;

    // An underscore in the filter must not match arbitrary characters
    let response = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("q", format!("snake_case {}", marker))])
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected array");

    assert_eq!(books.len(), 1);
    assert!(books[0]["title"].as_str().unwrap().starts_with("snake_case"));
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_conflicts() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let isbn = format!("isbn-{}", unique());

    let payload = json!({
        "title": "Some Book",
        "author": "Someone",
        "isbn": isbn,
        "stock": 1
    });

    let first = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_lend_exhausts_stock_then_conflicts() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, "Single Copy", "Author", 1).await;
    let first_reader = create_client_record(&client, &token, "Ana Silva").await;
    let second_reader = create_client_record(&client, &token, "Carlos Souza").await;

    let first = lend(&client, &token, first_reader, book_id).await;
    assert_eq!(first.status(), 201);

    // Stock is now 0
    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get book")
        .json()
        .await
        .expect("Failed to parse book");
    assert_eq!(book["stock"], 0);

    let second = lend(&client, &token, second_reader, book_id).await;
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_lend_unknown_book_or_client_not_found() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let reader = create_client_record(&client, &token, "Ana Silva").await;
    let book_id = create_book(&client, &token, "Known", "Author", 1).await;

    let missing_book = lend(&client, &token, reader, 999_999_999).await;
    assert_eq!(missing_book.status(), 404);

    let missing_client = lend(&client, &token, 999_999_999, book_id).await;
    assert_eq!(missing_client.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_return_restores_stock_and_is_final() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, "Round Trip", "Author", 3).await;
    let reader = create_client_record(&client, &token, "Maria").await;

    let loan: Value = lend(&client, &token, reader, book_id)
        .await
        .json()
        .await
        .expect("Failed to parse loan");
    let loan_id = loan["id"].as_i64().expect("No loan id");
    assert!(loan["returned_at"].is_null());

    let returned = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to return loan");
    assert!(returned.status().is_success());

    let returned_body: Value = returned.json().await.expect("Failed to parse return");
    let first_returned_at = returned_body["returned_at"]
        .as_str()
        .expect("returned_at not set")
        .to_string();

    // Stock is back to its pre-lend value
    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get book")
        .json()
        .await
        .expect("Failed to parse book");
    assert_eq!(book["stock"], 3);

    // Second return is rejected and the original timestamp stands
    let again = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(again.status(), 409);

    let loans: Value = client
        .get(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list loans")
        .json()
        .await
        .expect("Failed to parse loans");
    let entry = loans
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["id"].as_i64() == Some(loan_id))
        .expect("Loan missing from list");
    assert_eq!(entry["returned_at"].as_str(), Some(first_returned_at.as_str()));
}

#[tokio::test]
#[ignore]
async fn test_loans_listed_newest_first() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, "Popular", "Author", 3).await;
    let reader = create_client_record(&client, &token, "Reader").await;

    let mut ids = Vec::new();
    for _ in 0..3 {
        let loan: Value = lend(&client, &token, reader, book_id)
            .await
            .json()
            .await
            .expect("Failed to parse loan");
        ids.push(loan["id"].as_i64().expect("No loan id"));
    }

    let loans: Value = client
        .get(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list loans")
        .json()
        .await
        .expect("Failed to parse loans");
    let listed: Vec<i64> = loans
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|l| l["id"].as_i64())
        .filter(|id| ids.contains(id))
        .collect();

    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(listed, expected);
}

#[tokio::test]
#[ignore]
async fn test_delete_loaned_book_conflicts() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, "Borrowed", "Author", 1).await;
    let reader = create_client_record(&client, &token, "Reader").await;

    let loan = lend(&client, &token, reader, book_id).await;
    assert_eq!(loan.status(), 201);

    let deleted = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(deleted.status(), 409);

    // The book row is untouched
    let book = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get book");
    assert!(book.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_delete_client_with_loans_conflicts() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, "Held", "Author", 1).await;
    let reader = create_client_record(&client, &token, "Reader").await;

    let loan = lend(&client, &token, reader, book_id).await;
    assert_eq!(loan.status(), 201);

    let deleted = client
        .delete(format!("{}/clients/{}", BASE_URL, reader))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(deleted.status(), 409);
}
