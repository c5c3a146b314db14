//! Schema for the six league tables
//!
//! Every statement is idempotent (`IF NOT EXISTS`), so `leaguectl migrate`
//! can run on every deploy.

use sqlx::PgPool;

const STATEMENTS: &[(&str, &str)] = &[
    ("pgcrypto", "CREATE EXTENSION IF NOT EXISTS pgcrypto"),
    (
        "teams",
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL CHECK (btrim(name) <> ''),
            city TEXT,
            coach TEXT,
            home_stadium TEXT,
            founded_year INTEGER,
            logo_url TEXT,
            description TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "players",
        r#"
        CREATE TABLE IF NOT EXISTS players (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL CHECK (btrim(name) <> ''),
            team_id UUID REFERENCES teams(id) ON DELETE SET NULL,
            position TEXT CHECK (position IN ('goalkeeper', 'defender', 'midfielder', 'forward')),
            jersey_number INTEGER CHECK (jersey_number >= 0),
            age INTEGER CHECK (age >= 0),
            nationality TEXT DEFAULT 'Mauritania',
            height INTEGER CHECK (height >= 0),
            weight INTEGER CHECK (weight >= 0),
            bio TEXT,
            image_url TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "matches",
        r#"
        CREATE TABLE IF NOT EXISTS matches (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            home_team_id UUID NOT NULL REFERENCES teams(id),
            away_team_id UUID NOT NULL REFERENCES teams(id),
            home_team_name TEXT,
            away_team_name TEXT,
            match_date TIMESTAMPTZ NOT NULL,
            venue TEXT,
            referee TEXT,
            status TEXT NOT NULL DEFAULT 'scheduled'
                CHECK (status IN ('scheduled', 'live', 'completed', 'cancelled')),
            home_score INTEGER NOT NULL DEFAULT 0 CHECK (home_score >= 0),
            away_score INTEGER NOT NULL DEFAULT 0 CHECK (away_score >= 0),
            round TEXT DEFAULT 'regular',
            competition TEXT DEFAULT 'Super-D1',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CHECK (home_team_id <> away_team_id)
        )
        "#,
    ),
    (
        "news",
        r#"
        CREATE TABLE IF NOT EXISTS news (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title TEXT NOT NULL CHECK (btrim(title) <> ''),
            content TEXT NOT NULL CHECK (btrim(content) <> ''),
            author TEXT DEFAULT 'site administration',
            image_url TEXT,
            is_featured BOOLEAN NOT NULL DEFAULT FALSE,
            published BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "news_published_idx",
        "CREATE INDEX IF NOT EXISTS news_published_created_idx ON news (published, created_at DESC)",
    ),
    (
        "shop_categories",
        r#"
        CREATE TABLE IF NOT EXISTS shop_categories (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT,
            description TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "shop_items",
        r#"
        CREATE TABLE IF NOT EXISTS shop_items (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL CHECK (btrim(name) <> ''),
            description TEXT,
            price NUMERIC(10, 2) NOT NULL CHECK (price > 0),
            stock_quantity INTEGER NOT NULL DEFAULT 0 CHECK (stock_quantity >= 0),
            size TEXT,
            color TEXT,
            image_url TEXT,
            category_id UUID REFERENCES shop_categories(id) ON DELETE SET NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
];

/// Create any missing tables and indexes.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("running league migrations");

    for (name, sql) in STATEMENTS {
        sqlx::query(sql).execute(pool).await?;
        tracing::debug!(step = *name, "migration applied");
    }

    tracing::info!(steps = STATEMENTS.len(), "migrations complete");
    Ok(())
}
