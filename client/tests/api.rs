//! Client against a real server backed by the in-memory repository.

use reqwest::StatusCode;
use std::sync::Arc;
use student_client::{ClientError, StudentClient, StudentCreateDto, StudentForm};
use student_records::{api_routes, AppState, InMemoryStudentRepository};
use tokio::net::TcpListener;

async fn spawn_server() -> StudentClient {
    let state = AppState::new(Arc::new(InMemoryStudentRepository::new()));
    let app = api_routes(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    StudentClient::new(format!("http://{addr}"))
}

fn joao() -> StudentCreateDto {
    StudentCreateDto::new("João", "joao@gmail.com", "001", "11111111111")
}

#[tokio::test]
async fn create_list_and_fetch() {
    let client = spawn_server().await;

    let created = client.create(&joao()).await.expect("create");
    assert_eq!(created.mensagem, "Aluno cadastrado com sucesso!");
    assert_eq!(created.aluno.ra, "001");

    let all = client.get_all().await.expect("list");
    assert_eq!(all.len(), 1);

    let student = client.get_by_id(all[0].id).await.expect("fetch").expect("present");
    assert_eq!(student.email, "joao@gmail.com");
    assert!(client.get_by_id(404).await.expect("fetch").is_none());
}

#[tokio::test]
async fn duplicate_ra_surfaces_api_error() {
    let client = spawn_server().await;
    client.create(&joao()).await.expect("create");

    match client.create(&joao()).await {
        Err(ClientError::Api { status, errors }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(errors, vec!["RA já cadastrado. Use outro número.".to_string()]);
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn save_posts_then_puts() {
    let client = spawn_server().await;
    let mut form = StudentForm {
        id: None,
        name: "Maria".into(),
        email: "maria@gmail.com".into(),
        ra: "002".into(),
        cpf: "22222222222".into(),
    };
    assert_eq!(client.save(&form).await.expect("post"), "Aluno cadastrado com sucesso!");

    let id = client.get_all().await.expect("list")[0].id;
    form.id = Some(id);
    form.name = "Maria Souza".into();
    assert_eq!(client.save(&form).await.expect("put"), "Cadastro atualizado com sucesso!");
    assert_eq!(client.get_by_id(id).await.unwrap().unwrap().name, "Maria Souza");
}

#[tokio::test]
async fn paged_search_and_delete() {
    let client = spawn_server().await;
    client.create(&joao()).await.expect("create");
    client
        .create(&StudentCreateDto::new("Maria", "maria@gmail.com", "002", "22222222222"))
        .await
        .expect("create");

    let page = client.get_paged(1, 1, "").await.expect("page");
    assert_eq!(page.total_items, 2);
    assert_eq!(page.items.len(), 1);

    let page = client.get_paged(1, 10, "222").await.expect("search");
    assert_eq!(page.total_items, 1);
    let maria = page.items[0].id;

    assert_eq!(client.delete(maria).await.expect("delete"), "Aluno excluído com sucesso!");
    match client.delete(maria).await {
        Err(ClientError::Api { status, errors }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(errors, vec!["Aluno não encontrado.".to_string()]);
        }
        other => panic!("expected not found, got {other:?}"),
    }
}
