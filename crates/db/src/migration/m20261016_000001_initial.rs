//! Initial database migration.
//!
//! Creates the platform tables, their indexes and the `updated_at` trigger on
//! users. The credential, wallet and NFT ledger tables are created for the
//! blockchain side of the platform; nothing in the API writes to them yet.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: PEOPLE
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(RESIDENCY_APPLICATIONS_SQL).await?;

        // ============================================================
        // PART 2: ECONOMY
        // ============================================================
        db.execute_unprepared(BUSINESSES_SQL).await?;
        db.execute_unprepared(JOBS_SQL).await?;
        db.execute_unprepared(PRODUCTS_SQL).await?;

        // ============================================================
        // PART 3: CULTURE
        // ============================================================
        db.execute_unprepared(CULTURAL_ACTIVITIES_SQL).await?;

        // ============================================================
        // PART 4: CATALOGS
        // ============================================================
        db.execute_unprepared(CATALOG_SQL).await?;

        // ============================================================
        // PART 5: CHAIN LEDGER
        // ============================================================
        db.execute_unprepared(CHAIN_SQL).await?;

        // ============================================================
        // PART 6: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const USERS_SQL: &str = r"
CREATE TABLE users (
    id                  SERIAL PRIMARY KEY,
    email               VARCHAR(255) NOT NULL,
    first_name          VARCHAR(100) NOT NULL,
    last_name           VARCHAR(100) NOT NULL,
    password            VARCHAR(255) NOT NULL,
    profile_image_url   TEXT,
    brownie_points      INTEGER NOT NULL DEFAULT 0,
    tier_level          INTEGER NOT NULL DEFAULT 1,
    is_digital_resident BOOLEAN NOT NULL DEFAULT false,
    nft_id              VARCHAR(100),
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_users_email UNIQUE (email),
    CONSTRAINT chk_users_points CHECK (brownie_points >= 0),
    CONSTRAINT chk_users_tier CHECK (tier_level BETWEEN 1 AND 5)
);

CREATE TABLE user_language_settings (
    id                  SERIAL PRIMARY KEY,
    user_id             INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    preferred_language  VARCHAR(10) NOT NULL DEFAULT 'en',
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_user_language_settings_user UNIQUE (user_id)
);
";

const RESIDENCY_APPLICATIONS_SQL: &str = r"
CREATE TABLE residency_applications (
    id                   SERIAL PRIMARY KEY,
    user_id              INTEGER NOT NULL REFERENCES users(id),
    first_name           VARCHAR(100) NOT NULL,
    last_name            VARCHAR(100) NOT NULL,
    email                VARCHAR(255) NOT NULL,
    country_of_origin    VARCHAR(100) NOT NULL,
    reason_for_residency TEXT NOT NULL,
    status               VARCHAR(20) NOT NULL DEFAULT 'pending',
    reviewed_by          INTEGER REFERENCES users(id),
    reviewed_at          TIMESTAMPTZ,
    created_at           TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_residency_status CHECK (status IN ('pending', 'approved', 'rejected'))
);

CREATE INDEX idx_residency_applications_user ON residency_applications(user_id);
CREATE INDEX idx_residency_applications_created ON residency_applications(created_at DESC);
";

const BUSINESSES_SQL: &str = r"
CREATE TABLE businesses (
    id              SERIAL PRIMARY KEY,
    owner_id        INTEGER NOT NULL REFERENCES users(id),
    name            VARCHAR(200) NOT NULL,
    description     TEXT NOT NULL,
    category        VARCHAR(100) NOT NULL,
    license_number  VARCHAR(100),
    business_nft_id VARCHAR(100),
    status          VARCHAR(20) NOT NULL DEFAULT 'pending',
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_business_status CHECK (status IN ('pending', 'approved', 'rejected'))
);

CREATE INDEX idx_businesses_owner ON businesses(owner_id);
CREATE INDEX idx_businesses_status ON businesses(status);
";

const JOBS_SQL: &str = r"
CREATE TABLE jobs (
    id               SERIAL PRIMARY KEY,
    business_id      INTEGER,
    posted_by        INTEGER NOT NULL,
    title            VARCHAR(200) NOT NULL,
    description      TEXT NOT NULL,
    category         VARCHAR(100) NOT NULL,
    experience_level VARCHAR(50) NOT NULL,
    location         VARCHAR(100) NOT NULL,
    employment_type  VARCHAR(50) NOT NULL,
    skills           TEXT[] NOT NULL DEFAULT '{}',
    is_active        BOOLEAN NOT NULL DEFAULT true,
    created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT fk_jobs_business FOREIGN KEY (business_id) REFERENCES businesses(id),
    CONSTRAINT fk_jobs_posted_by FOREIGN KEY (posted_by) REFERENCES users(id)
);

CREATE INDEX idx_jobs_active_created ON jobs(is_active, created_at DESC);
CREATE INDEX idx_jobs_category ON jobs(category);

CREATE TABLE job_applications (
    id           SERIAL PRIMARY KEY,
    job_id       INTEGER NOT NULL,
    applicant_id INTEGER NOT NULL,
    cover_letter TEXT,
    resume_url   TEXT,
    status       VARCHAR(20) NOT NULL DEFAULT 'pending',
    applied_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT fk_job_applications_job FOREIGN KEY (job_id) REFERENCES jobs(id),
    CONSTRAINT fk_job_applications_applicant FOREIGN KEY (applicant_id) REFERENCES users(id),
    CONSTRAINT chk_job_application_status
        CHECK (status IN ('pending', 'reviewed', 'accepted', 'rejected'))
);

CREATE INDEX idx_job_applications_job ON job_applications(job_id);
CREATE INDEX idx_job_applications_applicant ON job_applications(applicant_id);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id                    SERIAL PRIMARY KEY,
    seller_id             INTEGER NOT NULL REFERENCES users(id),
    name                  VARCHAR(200) NOT NULL,
    description           TEXT NOT NULL,
    price                 NUMERIC(10, 2) NOT NULL,
    image_url             TEXT,
    category              VARCHAR(100) NOT NULL,
    brownie_points_reward INTEGER NOT NULL DEFAULT 0,
    in_stock              BOOLEAN NOT NULL DEFAULT true,
    created_at            TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_products_price CHECK (price >= 0),
    CONSTRAINT chk_products_reward CHECK (brownie_points_reward >= 0)
);

CREATE INDEX idx_products_in_stock_created ON products(in_stock, created_at DESC);
";

const CULTURAL_ACTIVITIES_SQL: &str = r"
CREATE TABLE cultural_activities (
    id            SERIAL PRIMARY KEY,
    title         VARCHAR(200) NOT NULL,
    description   TEXT NOT NULL,
    type          VARCHAR(50) NOT NULL,
    content       JSONB NOT NULL DEFAULT '{}',
    points_reward INTEGER NOT NULL DEFAULT 0,
    image_url     TEXT,
    difficulty    VARCHAR(20) NOT NULL DEFAULT 'beginner',
    is_active     BOOLEAN NOT NULL DEFAULT true,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_activities_reward CHECK (points_reward >= 0)
);

CREATE TABLE user_activities (
    id            SERIAL PRIMARY KEY,
    user_id       INTEGER NOT NULL REFERENCES users(id),
    activity_id   INTEGER NOT NULL REFERENCES cultural_activities(id),
    score         INTEGER,
    points_earned INTEGER NOT NULL DEFAULT 0,
    completed_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_user_activities_user ON user_activities(user_id, completed_at DESC);
";

const CATALOG_SQL: &str = r"
CREATE TABLE mini_apps (
    id          SERIAL PRIMARY KEY,
    name        VARCHAR(200) NOT NULL,
    description TEXT NOT NULL,
    developer   VARCHAR(200) NOT NULL,
    version     VARCHAR(20) NOT NULL,
    price       NUMERIC(10, 2) NOT NULL DEFAULT 0,
    rating      NUMERIC(3, 2) NOT NULL DEFAULT 0,
    downloads   INTEGER NOT NULL DEFAULT 0,
    active      BOOLEAN NOT NULL DEFAULT true,
    code_hash   VARCHAR(66) NOT NULL,
    permissions JSONB NOT NULL DEFAULT '[]',
    verified    BOOLEAN NOT NULL DEFAULT false,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE government_services (
    id                   SERIAL PRIMARY KEY,
    service_name         VARCHAR(200) NOT NULL,
    description          TEXT NOT NULL,
    department           VARCHAR(200) NOT NULL,
    contract_address     VARCHAR(42),
    is_active            BOOLEAN NOT NULL DEFAULT true,
    required_credentials JSONB NOT NULL DEFAULT '[]',
    processing_time      VARCHAR(100),
    fee                  NUMERIC(10, 2) NOT NULL DEFAULT 0,
    created_at           TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_government_services_name UNIQUE (service_name)
);

CREATE TABLE service_applications (
    id             SERIAL PRIMARY KEY,
    user_id        INTEGER NOT NULL REFERENCES users(id),
    service_id     INTEGER NOT NULL REFERENCES government_services(id),
    status         VARCHAR(20) NOT NULL DEFAULT 'pending',
    application_data JSONB NOT NULL DEFAULT '{}',
    submitted_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    processed_at   TIMESTAMPTZ
);
";

const CHAIN_SQL: &str = r"
CREATE TABLE nfts (
    id             SERIAL PRIMARY KEY,
    token_id       VARCHAR(100) NOT NULL,
    owner_id       INTEGER NOT NULL REFERENCES users(id),
    kind           VARCHAR(20) NOT NULL,
    metadata       JSONB NOT NULL DEFAULT '{}',
    tx_hash        VARCHAR(66),
    created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_nfts_token UNIQUE (token_id)
);

CREATE TABLE soulbound_credentials (
    id              SERIAL PRIMARY KEY,
    user_id         INTEGER NOT NULL REFERENCES users(id),
    credential_type VARCHAR(100) NOT NULL,
    issuer          VARCHAR(200) NOT NULL,
    token_id        VARCHAR(100) NOT NULL,
    issued_at       TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    revoked         BOOLEAN NOT NULL DEFAULT false
);

CREATE TABLE wallet_balances (
    id            SERIAL PRIMARY KEY,
    user_id       INTEGER NOT NULL REFERENCES users(id),
    token_symbol  VARCHAR(20) NOT NULL,
    balance       NUMERIC(36, 18) NOT NULL DEFAULT 0,
    updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_wallet_balances_user_token UNIQUE (user_id, token_symbol)
);

CREATE TABLE gamification_rewards (
    id          SERIAL PRIMARY KEY,
    user_id     INTEGER NOT NULL REFERENCES users(id),
    reward_type VARCHAR(50) NOT NULL,
    amount      INTEGER NOT NULL,
    reason      TEXT,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE blockchain_transactions (
    id          SERIAL PRIMARY KEY,
    user_id     INTEGER REFERENCES users(id),
    tx_hash     VARCHAR(66) NOT NULL,
    tx_type     VARCHAR(50) NOT NULL,
    status      VARCHAR(20) NOT NULL DEFAULT 'pending',
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_blockchain_transactions_hash UNIQUE (tx_hash)
);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_user_language_settings_updated_at
    BEFORE UPDATE ON user_language_settings
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS blockchain_transactions CASCADE;
DROP TABLE IF EXISTS gamification_rewards CASCADE;
DROP TABLE IF EXISTS wallet_balances CASCADE;
DROP TABLE IF EXISTS soulbound_credentials CASCADE;
DROP TABLE IF EXISTS nfts CASCADE;
DROP TABLE IF EXISTS service_applications CASCADE;
DROP TABLE IF EXISTS government_services CASCADE;
DROP TABLE IF EXISTS mini_apps CASCADE;
DROP TABLE IF EXISTS user_activities CASCADE;
DROP TABLE IF EXISTS cultural_activities CASCADE;
DROP TABLE IF EXISTS products CASCADE;
DROP TABLE IF EXISTS job_applications CASCADE;
DROP TABLE IF EXISTS jobs CASCADE;
DROP TABLE IF EXISTS businesses CASCADE;
DROP TABLE IF EXISTS residency_applications CASCADE;
DROP TABLE IF EXISTS user_language_settings CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP FUNCTION IF EXISTS set_updated_at() CASCADE;
";
