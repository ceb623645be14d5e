use anyhow::{Context, Result};
use futures_util::future::try_join_all;

use todos_api::{
    client::{ClientConfig, TodoBoard, TodoClient},
    logging::init_tracing,
    models::{CreateTodoRequest, Priority},
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");

    // Defaults assume the server is running locally on :4000
    let cfg = match std::env::var("BASE_URL") {
        Ok(base) => ClientConfig::new(base),
        Err(_) => ClientConfig::default(),
    };
    let client = TodoClient::new(cfg).context("building todo client")?;
    println!("Talking to {}", client.base_url());

    // 1) seed a few todos concurrently
    let seeds = [
        ("Buy milk", "high", "2025-01-01"),
        ("Write report", "medium", "2025-02-01"),
        ("Water plants", "low", "2025-03-01"),
    ];
    let created = try_join_all(seeds.iter().map(|(text, priority, deadline)| {
        let request = CreateTodoRequest {
            text: Some(text.to_string()),
            priority: Some(priority.to_string()),
            deadline: Some(deadline.to_string()),
            complete: None,
        };
        let client = &client;
        async move { client.create(&request).await }
    }))
    .await
    .context("seeding todos")?;
    println!("Seeded {} todos", created.len());

    let mut board = TodoBoard::new(client);
    board.refresh().await;
    print_board(&board);

    // 2) add one through the form
    {
        let draft = board.draft_mut();
        draft.text = "Call the plumber".to_string();
        draft.priority = Priority::Medium;
        draft.deadline = "2025-04-01".to_string();
    }
    let added = board.submit_draft().await.context("submitting draft")?;

    // 3) tick it off, then rename it
    board.toggle_complete(added.id).await.context("toggling")?;
    if board.select(added.id) {
        if let Some(selected) = board.selected_mut() {
            selected.text = "Call the plumber (done)".to_string();
        }
        board.save_edit().await.context("saving edit")?;
    }
    print_board(&board);

    // 4) clean up everything we created
    for todo in created.iter().chain(std::iter::once(&added)) {
        if board.select(todo.id) {
            board.confirm_delete().await.context("deleting")?;
        }
    }
    print_board(&board);

    Ok(())
}

fn print_board(board: &TodoBoard) {
    println!("\n{} todo(s):", board.todos().len());
    for todo in board.todos() {
        let mark = if todo.complete { "x" } else { " " };
        println!(
            "  [{mark}] {:<28} {:<6} {}",
            todo.text,
            todo.priority.as_str(),
            todo.deadline
        );
    }
}
