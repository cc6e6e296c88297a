use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::storage::models::{Measurement, Station};
use crate::storage::SqliteManager;

// A single never-recycled connection keeps the in-memory database alive
pub async fn empty_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite")
}

pub async fn create_tables(pool: &SqlitePool) {
    sqlx::query(
        r#"
        CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT NOT NULL,
            name TEXT,
            latitude REAL,
            longitude REAL,
            elevation REAL
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("create station");

    sqlx::query(
        r#"
        CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT NOT NULL,
            date TEXT NOT NULL,
            prcp REAL,
            tobs REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("create measurement");
}

pub async fn insert_station(pool: &SqlitePool, station: &Station) {
    sqlx::query("INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?, ?, ?, ?, ?)")
        .bind(&station.station)
        .bind(&station.name)
        .bind(station.latitude)
        .bind(station.longitude)
        .bind(station.elevation)
        .execute(pool)
        .await
        .expect("insert station");
}

pub async fn insert_measurement(pool: &SqlitePool, station: &str, date: &str, prcp: Option<f64>, tobs: f64) {
    let row = Measurement {
        id: None,
        station: station.to_string(),
        date: date.to_string(),
        prcp,
        tobs,
    };

    sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
        .bind(&row.station)
        .bind(&row.date)
        .bind(row.prcp)
        .bind(row.tobs)
        .execute(pool)
        .await
        .expect("insert measurement");
}

pub fn station(id: &str, name: &str) -> Station {
    Station {
        id: None,
        station: id.to_string(),
        name: Some(name.to_string()),
        latitude: Some(21.2716),
        longitude: Some(-157.8168),
        elevation: Some(3.0),
    }
}

/// Three stations; USC00519281 has the most rows. Latest date is 2017-08-23,
/// so the one-year cutoff is 2016-08-23.
pub async fn seeded_pool() -> SqlitePool {
    let pool = empty_pool().await;
    create_tables(&pool).await;

    insert_station(&pool, &station("USC00519397", "WAIKIKI 717.2, HI US")).await;
    insert_station(&pool, &station("USC00513117", "KANEOHE 838.1, HI US")).await;
    insert_station(&pool, &station("USC00519281", "WAIHEE 837.5, HI US")).await;

    insert_measurement(&pool, "USC00519397", "2010-01-01", Some(0.08), 65.0).await;
    insert_measurement(&pool, "USC00519397", "2016-08-22", Some(0.40), 79.0).await;
    insert_measurement(&pool, "USC00519397", "2016-08-23", Some(0.00), 81.0).await;
    insert_measurement(&pool, "USC00519397", "2017-08-23", Some(0.00), 81.0).await;

    insert_measurement(&pool, "USC00513117", "2016-08-23", Some(0.15), 76.0).await;
    insert_measurement(&pool, "USC00513117", "2017-01-01", None, 70.0).await;

    insert_measurement(&pool, "USC00519281", "2010-01-01", Some(0.15), 70.0).await;
    insert_measurement(&pool, "USC00519281", "2016-08-22", Some(0.02), 77.0).await;
    insert_measurement(&pool, "USC00519281", "2016-08-24", Some(2.15), 77.0).await;
    insert_measurement(&pool, "USC00519281", "2017-02-02", Some(0.01), 59.0).await;
    insert_measurement(&pool, "USC00519281", "2017-08-18", None, 79.0).await;

    pool
}

pub async fn seeded_manager() -> SqliteManager {
    SqliteManager::from_pool(seeded_pool().await)
        .await
        .expect("seeded schema verifies")
}

pub async fn empty_manager() -> SqliteManager {
    let pool = empty_pool().await;
    create_tables(&pool).await;
    SqliteManager::from_pool(pool)
        .await
        .expect("empty schema verifies")
}
