#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::super::dtos::{TodoDto, TodoListDto};
    use super::super::todo_service::{TodoService, TodoServiceImpl};
    use crate::domain::repository::TodoRepository;
    use crate::domain::todo::{Todo, TodoId, TodoList, TodoListId};

    #[derive(Default)]
    struct Store {
        lists: HashMap<i64, TodoList>,
        todos: HashMap<i64, Todo>,
        next_id: i64,
        saves: usize,
    }

    /// Maps keyed by id standing in for the relational store. `saves` counts
    /// every write so tests can assert that missed lookups persist nothing.
    #[derive(Clone, Default)]
    struct InMemoryRepo {
        store: Arc<Mutex<Store>>,
    }

    impl InMemoryRepo {
        fn saves(&self) -> usize {
            self.store.lock().unwrap().saves
        }

        fn todo_count(&self, list_id: TodoListId) -> usize {
            self.store
                .lock()
                .unwrap()
                .todos
                .values()
                .filter(|t| t.list_id == list_id)
                .count()
        }

        fn only_todo_id(&self) -> TodoId {
            let store = self.store.lock().unwrap();
            assert_eq!(store.todos.len(), 1);
            *store.todos.values().map(|t| &t.id).next().unwrap()
        }
    }

    #[async_trait]
    impl TodoRepository for InMemoryRepo {
        async fn init(&self) -> Result<()> {
            Ok(())
        }

        async fn create_list(&self, mut list: TodoList) -> Result<TodoList> {
            let mut store = self.store.lock().unwrap();
            store.next_id += 1;
            list.id = TodoListId(store.next_id);
            store.lists.insert(list.id.0, list.clone());
            store.saves += 1;
            Ok(list)
        }

        async fn all_lists(&self) -> Result<Vec<TodoList>> {
            let store = self.store.lock().unwrap();
            let mut lists: Vec<TodoList> = store.lists.values().cloned().collect();
            for list in &mut lists {
                list.todos = store
                    .todos
                    .values()
                    .filter(|t| t.list_id == list.id)
                    .cloned()
                    .collect();
            }
            lists.sort_by_key(|l| l.id.0);
            Ok(lists)
        }

        async fn get_list(&self, id: TodoListId) -> Result<Option<TodoList>> {
            let store = self.store.lock().unwrap();
            let Some(mut list) = store.lists.get(&id.0).cloned() else {
                return Ok(None);
            };
            list.todos = store
                .todos
                .values()
                .filter(|t| t.list_id == id)
                .cloned()
                .collect();
            Ok(Some(list))
        }

        async fn find_list(&self, id: TodoListId) -> Result<Option<TodoList>> {
            Ok(self.store.lock().unwrap().lists.get(&id.0).cloned())
        }

        async fn update_list(&self, list: &TodoList) -> Result<()> {
            let mut store = self.store.lock().unwrap();
            for todo in list.todos.iter().filter(|t| !t.id.is_assigned()) {
                store.next_id += 1;
                let mut todo = todo.clone();
                todo.id = TodoId(store.next_id);
                store.todos.insert(todo.id.0, todo);
            }
            let mut stored = list.clone();
            stored.todos = Vec::new();
            store.lists.insert(stored.id.0, stored);
            store.saves += 1;
            Ok(())
        }

        async fn delete_list(&self, list: &TodoList) -> Result<()> {
            let mut store = self.store.lock().unwrap();
            store.lists.remove(&list.id.0);
            store.todos.retain(|_, t| t.list_id != list.id);
            store.saves += 1;
            Ok(())
        }

        async fn get_todo(&self, id: TodoId) -> Result<Option<Todo>> {
            Ok(self.store.lock().unwrap().todos.get(&id.0).cloned())
        }

        async fn find_todo(&self, id: TodoId) -> Result<Option<Todo>> {
            Ok(self.store.lock().unwrap().todos.get(&id.0).cloned())
        }

        async fn update_todo(&self, todo: &Todo) -> Result<()> {
            let mut store = self.store.lock().unwrap();
            store.todos.insert(todo.id.0, todo.clone());
            store.saves += 1;
            Ok(())
        }

        async fn delete_todo(&self, todo: &Todo) -> Result<()> {
            let mut store = self.store.lock().unwrap();
            store.todos.remove(&todo.id.0);
            store.saves += 1;
            Ok(())
        }
    }

    fn service() -> (TodoServiceImpl<InMemoryRepo>, InMemoryRepo) {
        let repo = InMemoryRepo::default();
        (TodoServiceImpl::new(repo.clone()), repo)
    }

    fn list_dto(title: &str, description: Option<&str>) -> TodoListDto {
        TodoListDto {
            id: None,
            title: title.into(),
            description: description.map(Into::into),
        }
    }

    fn todo_dto(title: &str) -> TodoDto {
        TodoDto {
            id: None,
            title: title.into(),
            description: None,
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
            completed: false,
        }
    }

    #[tokio::test]
    async fn create_list_then_get_round_trips() {
        let (service, _) = service();
        let (id, created) = service
            .create_list(list_dto("Groceries", Some("weekly")))
            .await
            .unwrap();
        assert!(id.is_assigned());
        assert_eq!(created.id, Some(id));

        let got = service.get_list(id).await.unwrap().unwrap();
        assert_eq!(got.title, "Groceries");
        assert_eq!(got.description.as_deref(), Some("weekly"));
    }

    #[tokio::test]
    async fn get_list_missing_is_none() {
        let (service, _) = service();
        assert!(service.get_list(TodoListId(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn all_lists_empty_is_a_valid_result() {
        let (service, _) = service();
        assert!(service.all_lists().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn all_lists_returns_every_list() {
        let (service, _) = service();
        service.create_list(list_dto("a", None)).await.unwrap();
        service.create_list(list_dto("b", None)).await.unwrap();
        let lists = service.all_lists().await.unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].title, "a");
        assert_eq!(lists[1].title, "b");
    }

    #[tokio::test]
    async fn update_list_overwrites_title_and_description() {
        let (service, _) = service();
        let (id, _) = service.create_list(list_dto("old", None)).await.unwrap();

        let updated = service
            .update_list(id, list_dto("new", Some("desc")))
            .await
            .unwrap();
        assert!(updated.is_some());

        let got = service.get_list(id).await.unwrap().unwrap();
        assert_eq!(got.title, "new");
        assert_eq!(got.description.as_deref(), Some("desc"));
    }

    #[tokio::test]
    async fn update_list_missing_persists_nothing() {
        let (service, repo) = service();
        let updated = service
            .update_list(TodoListId(9), list_dto("new", None))
            .await
            .unwrap();
        assert!(updated.is_none());
        assert_eq!(repo.saves(), 0);
    }

    #[tokio::test]
    async fn delete_list_cascades_to_owned_todos() {
        let (service, repo) = service();
        let (id, _) = service.create_list(list_dto("l", None)).await.unwrap();
        service.create_todo(id, todo_dto("t")).await.unwrap();
        assert_eq!(repo.todo_count(id), 1);

        assert!(service.delete_list(id).await.unwrap().is_some());
        assert!(service.get_list(id).await.unwrap().is_none());
        assert_eq!(repo.todo_count(id), 0);
    }

    #[tokio::test]
    async fn delete_list_missing_is_none() {
        let (service, repo) = service();
        assert!(service.delete_list(TodoListId(5)).await.unwrap().is_none());
        assert_eq!(repo.saves(), 0);
    }

    #[tokio::test]
    async fn create_todo_preserves_submitted_fields_verbatim() {
        let (service, repo) = service();
        let (id, _) = service.create_list(list_dto("l", None)).await.unwrap();

        let submitted = TodoDto {
            id: None,
            title: "Milk".into(),
            description: Some("2l".into()),
            created_at: Some(Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap()),
            completed: true,
        };
        let created = service
            .create_todo(id, submitted.clone())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(created.title, submitted.title);
        assert_eq!(created.description, submitted.description);
        assert_eq!(created.created_at, submitted.created_at);
        assert_eq!(created.completed, submitted.completed);
        assert_eq!(repo.todo_count(id), 1);
    }

    #[tokio::test]
    async fn create_todo_grows_child_count_by_one() {
        let (service, repo) = service();
        let (id, _) = service.create_list(list_dto("l", None)).await.unwrap();
        service.create_todo(id, todo_dto("a")).await.unwrap();
        assert_eq!(repo.todo_count(id), 1);
        service.create_todo(id, todo_dto("b")).await.unwrap();
        assert_eq!(repo.todo_count(id), 2);
    }

    #[tokio::test]
    async fn create_todo_under_missing_list_persists_nothing() {
        let (service, repo) = service();
        let created = service
            .create_todo(TodoListId(77), todo_dto("t"))
            .await
            .unwrap();
        assert!(created.is_none());
        assert_eq!(repo.saves(), 0);
    }

    #[tokio::test]
    async fn toggle_todo_twice_restores_original_flag() {
        let (service, repo) = service();
        let (id, _) = service.create_list(list_dto("l", None)).await.unwrap();
        service.create_todo(id, todo_dto("t")).await.unwrap();
        let todo_id = repo.only_todo_id();

        let once = service.toggle_todo(todo_id).await.unwrap().unwrap();
        assert!(once.completed);
        let twice = service.toggle_todo(todo_id).await.unwrap().unwrap();
        assert!(!twice.completed);
    }

    #[tokio::test]
    async fn toggle_todo_missing_is_none() {
        let (service, _) = service();
        assert!(service.toggle_todo(TodoId(7)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_todo_removes_only_that_todo() {
        let (service, repo) = service();
        let (id, _) = service.create_list(list_dto("l", None)).await.unwrap();
        service.create_todo(id, todo_dto("t")).await.unwrap();
        let todo_id = repo.only_todo_id();

        assert!(service.delete_todo(todo_id).await.unwrap().is_some());
        assert!(service.get_todo(todo_id).await.unwrap().is_none());
        assert!(service.get_list(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_todo_missing_is_none() {
        let (service, repo) = service();
        assert!(service.delete_todo(TodoId(3)).await.unwrap().is_none());
        assert_eq!(repo.saves(), 0);
    }
}
