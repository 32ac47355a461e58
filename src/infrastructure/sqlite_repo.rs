use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use crate::domain::{
    repository::TodoRepository,
    todo::{Todo, TodoId, TodoList, TodoListId},
};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        // Each pooled connection to :memory: opens a distinct database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todo_lists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT
            )",
        )
        .execute(&*self.pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL,
                completed INTEGER NOT NULL,
                todo_list_id INTEGER NOT NULL REFERENCES todo_lists(id) ON DELETE CASCADE
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn create_list(&self, list: TodoList) -> Result<TodoList> {
        let result = sqlx::query("INSERT INTO todo_lists (title, description) VALUES (?1, ?2)")
            .bind(&list.title)
            .bind(&list.description)
            .execute(&*self.pool)
            .await?;
        Ok(TodoList {
            id: TodoListId(result.last_insert_rowid()),
            ..list
        })
    }

    async fn all_lists(&self) -> Result<Vec<TodoList>> {
        let rows = sqlx::query("SELECT id, title, description FROM todo_lists ORDER BY id")
            .fetch_all(&*self.pool)
            .await?;
        let mut lists: Vec<TodoList> = rows.into_iter().map(row_to_list).collect();

        let todo_rows = sqlx::query(
            "SELECT id, title, description, created_at, completed, todo_list_id
             FROM todos ORDER BY id",
        )
        .fetch_all(&*self.pool)
        .await?;
        for row in todo_rows {
            let todo = row_to_todo(row);
            if let Some(list) = lists.iter_mut().find(|l| l.id == todo.list_id) {
                list.todos.push(todo);
            }
        }
        Ok(lists)
    }

    async fn get_list(&self, id: TodoListId) -> Result<Option<TodoList>> {
        let row = sqlx::query("SELECT id, title, description FROM todo_lists WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        let Some(row) = row else { return Ok(None) };
        let mut list = row_to_list(row);

        let todo_rows = sqlx::query(
            "SELECT id, title, description, created_at, completed, todo_list_id
             FROM todos WHERE todo_list_id = ?1 ORDER BY id",
        )
        .bind(id.0)
        .fetch_all(&*self.pool)
        .await?;
        list.todos = todo_rows.into_iter().map(row_to_todo).collect();
        Ok(Some(list))
    }

    async fn find_list(&self, id: TodoListId) -> Result<Option<TodoList>> {
        let row = sqlx::query("SELECT id, title, description FROM todo_lists WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(row_to_list))
    }

    async fn update_list(&self, list: &TodoList) -> Result<()> {
        // Row update and cascade-insert of new children commit together.
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE todo_lists SET title = ?2, description = ?3 WHERE id = ?1")
            .bind(list.id.0)
            .bind(&list.title)
            .bind(&list.description)
            .execute(&mut *tx)
            .await?;
        for todo in list.todos.iter().filter(|t| !t.id.is_assigned()) {
            sqlx::query(
                "INSERT INTO todos (title, description, created_at, completed, todo_list_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.created_at.to_rfc3339())
            .bind(todo.completed)
            .bind(todo.list_id.0)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete_list(&self, list: &TodoList) -> Result<()> {
        sqlx::query("DELETE FROM todo_lists WHERE id = ?1")
            .bind(list.id.0)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn get_todo(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query(
            "SELECT id, title, description, created_at, completed, todo_list_id
             FROM todos WHERE id = ?1",
        )
        .bind(id.0)
        .fetch_optional(&*self.pool)
        .await?;
        Ok(row.map(row_to_todo))
    }

    async fn find_todo(&self, id: TodoId) -> Result<Option<Todo>> {
        self.get_todo(id).await
    }

    async fn update_todo(&self, todo: &Todo) -> Result<()> {
        sqlx::query("UPDATE todos SET completed = ?2 WHERE id = ?1")
            .bind(todo.id.0)
            .bind(todo.completed)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn delete_todo(&self, todo: &Todo) -> Result<()> {
        sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(todo.id.0)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}

fn row_to_list(row: SqliteRow) -> TodoList {
    TodoList {
        id: TodoListId(row.get("id")),
        title: row.get("title"),
        description: row.get("description"),
        todos: Vec::new(),
    }
}

fn row_to_todo(row: SqliteRow) -> Todo {
    let created_at_str: String = row.get("created_at");
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .unwrap()
        .with_timezone(&Utc);

    Todo {
        id: TodoId(row.get("id")),
        title: row.get("title"),
        description: row.get("description"),
        created_at,
        completed: row.get("completed"),
        list_id: TodoListId(row.get("todo_list_id")),
    }
}
