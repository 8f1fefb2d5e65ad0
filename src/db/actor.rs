use crate::db::create::{AuthorCreate, BookCreate};
use crate::db::models::{CatalogEntry, DbAuthor, DbBook, DbCatalogRow, DeleteOutcome};
use crate::db::query::CatalogQuery;
use crate::db::schema::SQLITE_INIT;
use crate::error::CatalogError;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Books joined with their authors, filtered and ordered per the query.
    ListCatalog(CatalogQuery, RpcReplyPort<Result<Vec<CatalogEntry>, CatalogError>>),

    /// All authors ordered by name.
    ListAuthors(RpcReplyPort<Result<Vec<DbAuthor>, CatalogError>>),

    GetAuthor(i64, RpcReplyPort<Result<Option<DbAuthor>, CatalogError>>),

    GetBook(i64, RpcReplyPort<Result<Option<DbBook>, CatalogError>>),

    /// Insert an author and return its id.
    CreateAuthor(AuthorCreate, RpcReplyPort<Result<i64, CatalogError>>),

    /// Insert a book and return its id.
    CreateBook(BookCreate, RpcReplyPort<Result<i64, CatalogError>>),

    /// Delete a book, and its author too when no other book references it.
    DeleteBook(i64, RpcReplyPort<Result<DeleteOutcome, CatalogError>>),
}

/// Cloneable handle to the database actor. Handlers get one through router state.
#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn list_catalog(
        &self,
        query: CatalogQuery,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::ListCatalog, query)
            .map_err(|e| CatalogError::Actor(format!("DbActor ListCatalog RPC failed: {e}")))?
    }

    pub async fn list_authors(&self) -> Result<Vec<DbAuthor>, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::ListAuthors)
            .map_err(|e| CatalogError::Actor(format!("DbActor ListAuthors RPC failed: {e}")))?
    }

    pub async fn get_author(&self, id: i64) -> Result<Option<DbAuthor>, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::GetAuthor, id)
            .map_err(|e| CatalogError::Actor(format!("DbActor GetAuthor RPC failed: {e}")))?
    }

    pub async fn get_book(&self, id: i64) -> Result<Option<DbBook>, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::GetBook, id)
            .map_err(|e| CatalogError::Actor(format!("DbActor GetBook RPC failed: {e}")))?
    }

    pub async fn create_author(&self, create: AuthorCreate) -> Result<i64, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::CreateAuthor, create)
            .map_err(|e| CatalogError::Actor(format!("DbActor CreateAuthor RPC failed: {e}")))?
    }

    pub async fn create_book(&self, create: BookCreate) -> Result<i64, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::CreateBook, create)
            .map_err(|e| CatalogError::Actor(format!("DbActor CreateBook RPC failed: {e}")))?
    }

    pub async fn delete_book(&self, id: i64) -> Result<DeleteOutcome, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::DeleteBook, id)
            .map_err(|e| CatalogError::Actor(format!("DbActor DeleteBook RPC failed: {e}")))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        if let Some(parent) = connect_opts
            .get_filename()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ActorProcessingErr::from(format!(
                    "failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::ListCatalog(query, reply) => {
                let res = self.list_catalog(&state.pool, &query).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListAuthors(reply) => {
                let res = self.list_authors(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::GetAuthor(id, reply) => {
                let res = self.get_author(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::GetBook(id, reply) => {
                let res = self.get_book(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::CreateAuthor(create, reply) => {
                let res = self.create_author(&state.pool, create).await;
                let _ = reply.send(res);
            }
            DbActorMessage::CreateBook(create, reply) => {
                let res = self.create_book(&state.pool, create).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteBook(id, reply) => {
                let res = self.delete_book(&state.pool, id).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn list_catalog(
        &self,
        pool: &SqlitePool,
        query: &CatalogQuery,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let sql = format!(
            r#"
        SELECT b.id AS book_id, b.isbn, b.title, b.publication_year,
               a.id AS author_id, a.name AS author_name, a.birth_date, a.date_of_death
        FROM books b
        INNER JOIN authors a ON a.id = b.author_id
        WHERE ?1 IS NULL
           OR lower(b.title) LIKE lower(?1) ESCAPE '\'
           OR lower(a.name) LIKE lower(?1) ESCAPE '\'
           OR lower(b.isbn) LIKE lower(?1) ESCAPE '\'
        {}
        "#,
            query.sort.order_by_clause()
        );

        let rows = sqlx::query_as::<_, DbCatalogRow>(&sql)
            .bind(query.like_pattern())
            .fetch_all(pool)
            .await?;

        debug!(
            search = ?query.search,
            sort = query.sort.as_str(),
            rows = rows.len(),
            "Catalog listed"
        );
        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }

    async fn list_authors(&self, pool: &SqlitePool) -> Result<Vec<DbAuthor>, CatalogError> {
        let rows = sqlx::query_as::<_, DbAuthor>(
            r#"
        SELECT id, name, birth_date, date_of_death
        FROM authors
        ORDER BY name, id
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn get_author(
        &self,
        pool: &SqlitePool,
        id: i64,
    ) -> Result<Option<DbAuthor>, CatalogError> {
        let row = sqlx::query_as::<_, DbAuthor>(
            r#"
        SELECT id, name, birth_date, date_of_death
        FROM authors
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    async fn get_book(&self, pool: &SqlitePool, id: i64) -> Result<Option<DbBook>, CatalogError> {
        let row = sqlx::query_as::<_, DbBook>(
            r#"
        SELECT id, isbn, title, publication_year, author_id
        FROM books
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    async fn create_author(
        &self,
        pool: &SqlitePool,
        create: AuthorCreate,
    ) -> Result<i64, CatalogError> {
        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO authors (name, birth_date, date_of_death)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
        )
        .bind(&create.name)
        .bind(create.birth_date)
        .bind(create.date_of_death)
        .fetch_one(pool)
        .await?;

        info!(author_id = id, name = %create.name, "Author created");
        Ok(id)
    }

    async fn create_book(&self, pool: &SqlitePool, create: BookCreate) -> Result<i64, CatalogError> {
        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO books (isbn, title, publication_year, author_id)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
        )
        .bind(&create.isbn)
        .bind(&create.title)
        .bind(create.publication_year)
        .bind(create.author_id)
        .fetch_one(pool)
        .await?;

        info!(
            book_id = id,
            author_id = create.author_id,
            title = %create.title,
            "Book created"
        );
        Ok(id)
    }

    /// Removes the book and, if it was the author's last, the author, in one transaction.
    /// Any early return drops `tx`, which rolls everything back.
    async fn delete_book(
        &self,
        pool: &SqlitePool,
        id: i64,
    ) -> Result<DeleteOutcome, CatalogError> {
        let mut tx = pool.begin().await?;

        let book = sqlx::query_as::<_, DbBook>(
            r#"
        SELECT id, isbn, title, publication_year, author_id
        FROM books
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CatalogError::NotFound(id))?;

        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(book.id)
            .execute(&mut *tx)
            .await?;

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = ?")
            .bind(book.author_id)
            .fetch_one(&mut *tx)
            .await?;

        let removed_author = if remaining == 0 {
            sqlx::query_scalar::<_, String>("DELETE FROM authors WHERE id = ? RETURNING name")
                .bind(book.author_id)
                .fetch_optional(&mut *tx)
                .await?
        } else {
            None
        };

        tx.commit().await?;

        info!(
            book_id = book.id,
            author_id = book.author_id,
            title = %book.title,
            author_removed = removed_author.is_some(),
            "Book deleted"
        );
        Ok(DeleteOutcome {
            book_title: book.title,
            removed_author,
        })
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// Fails when the database cannot be opened or the schema cannot be applied.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, CatalogError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| CatalogError::Actor(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), CatalogError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
