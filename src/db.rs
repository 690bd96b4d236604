use crate::schema::TableData;
use crate::{DbConfig, Error, Result};
use deadpool_postgres::Pool;

pub struct DbHandle {
    pool: Pool,
}

impl DbHandle {
    pub async fn new(cfg: &DbConfig) -> Result<Self> {
        use deadpool_postgres::{Config, Runtime};

        let mut pool_cfg = Config::new();
        pool_cfg.user = Some(cfg.user.clone());
        pool_cfg.password = Some(cfg.password.clone());
        pool_cfg.dbname = Some(cfg.dbname.clone());
        pool_cfg.host = Some(cfg.host.clone());
        pool_cfg.port = Some(cfg.port);

        // no connection is made here, the pool connects when the
        // first query runs
        let pool = pool_cfg
            .create_pool(Some(Runtime::Tokio1), tokio_postgres::NoTls)
            .map_err(Error::CreatePool)?;

        Ok(Self { pool })
    }

    async fn get_conn(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(Error::GetDbConnection)
    }

    /// Runs `SELECT * FROM <table>;` and materializes the full result set.
    /// The connection is scoped to this call and returns to the pool on
    /// every exit path.
    pub async fn fetch_table(&self, table_name: &str) -> Result<TableData> {
        let conn = self.get_conn().await?;

        let query = format!("SELECT * FROM {};", table_name);
        let statement = conn.prepare(&query).await.map_err(Error::DbQuery)?;

        let mut table = TableData::for_columns(statement.columns())?;

        let rows = conn.query(&statement, &[]).await.map_err(Error::DbQuery)?;
        for row in rows.iter() {
            table.push_row(row)?;
        }

        Ok(table)
    }
}
