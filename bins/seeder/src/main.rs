//! Database seeder for Druk Digital development and demos.
//!
//! Seeds the demo user that request handlers fall back to, the cultural
//! activity catalog, the mini-app store and the government service catalog.
//! Every step is skipped when its rows already exist.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::Utc;
use druk_core::auth::hash_password;
use druk_core::chain::{TokenKind, generate_token_id};
use druk_shared::AppConfig;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set,
};
use serde_json::json;

use druk_db::entities::{cultural_activities, government_services, mini_apps, users};

/// Password of the demo account.
const DEMO_PASSWORD: &str = "druk-demo";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = druk_db::connect(&config.database.url, 2, 1)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding demo user...");
    seed_demo_user(&db, config.demo.default_user_id).await?;

    println!("Seeding cultural activities...");
    seed_cultural_activities(&db).await?;

    println!("Seeding mini-apps...");
    seed_mini_apps(&db).await?;

    println!("Seeding government services...");
    seed_government_services(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Seeds the account that requests without an explicit user act as.
async fn seed_demo_user(db: &DatabaseConnection, id: i32) -> anyhow::Result<()> {
    if users::Entity::find_by_id(id).one(db).await?.is_some() {
        println!("  Demo user {id} already exists, skipping...");
        return Ok(());
    }

    let now = Utc::now().into();
    users::ActiveModel {
        id: Set(id),
        email: Set("demo@druk.bt".to_string()),
        first_name: Set("Karma".to_string()),
        last_name: Set("Wangmo".to_string()),
        password: Set(hash_password(DEMO_PASSWORD)?),
        profile_image_url: Set(None),
        brownie_points: Set(0),
        tier_level: Set(1),
        is_digital_resident: Set(false),
        nft_id: Set(Some(generate_token_id(TokenKind::Resident))),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    // An explicit id does not advance the SERIAL sequence.
    db.execute_unprepared(
        "SELECT setval(pg_get_serial_sequence('users', 'id'), (SELECT MAX(id) FROM users))",
    )
    .await?;

    println!("  Created demo user {id}: demo@druk.bt / {DEMO_PASSWORD}");
    Ok(())
}

async fn seed_cultural_activities(db: &DatabaseConnection) -> anyhow::Result<()> {
    if cultural_activities::Entity::find().count(db).await? > 0 {
        println!("  Activities already exist, skipping...");
        return Ok(());
    }

    let activities = [
        (
            "Gross National Happiness",
            "Learn the four pillars behind Bhutan's development philosophy.",
            "quiz",
            json!({
                "questions": [
                    {
                        "question": "How many pillars does Gross National Happiness rest on?",
                        "options": ["Two", "Four", "Six", "Nine"],
                        "correctAnswer": "Four"
                    },
                    {
                        "question": "Which king introduced the idea of Gross National Happiness?",
                        "options": ["The First King", "The Third King", "The Fourth King"],
                        "correctAnswer": "The Fourth King"
                    }
                ]
            }),
            250,
            "beginner",
        ),
        (
            "Dzongkha Greetings",
            "Everyday phrases in the national language.",
            "learning_module",
            json!({
                "sections": [
                    {"title": "Kuzuzangpo la", "body": "Hello, used with everyone."},
                    {"title": "Kadrinchhe la", "body": "Thank you."}
                ]
            }),
            150,
            "beginner",
        ),
        (
            "Tshechu Festivals",
            "Masked dances, thongdrels and the meaning of the festival calendar.",
            "quiz",
            json!({
                "questions": [
                    {
                        "question": "In which month of the lunar calendar is the Paro Tshechu held?",
                        "options": ["First", "Second", "Eighth"],
                        "correctAnswer": "Second"
                    }
                ]
            }),
            400,
            "intermediate",
        ),
        (
            "Record a Folk Song",
            "Contribute a recording of a zhungdra or boedra song.",
            "contribution",
            json!({"instructions": "Upload a recording with the song's name and region."}),
            600,
            "advanced",
        ),
    ];

    for (title, description, activity_type, content, points_reward, difficulty) in activities {
        cultural_activities::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            activity_type: Set(activity_type.to_string()),
            content: Set(content),
            points_reward: Set(points_reward),
            image_url: Set(None),
            difficulty: Set(difficulty.to_string()),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        println!("  Created activity: {title}");
    }

    Ok(())
}

async fn seed_mini_apps(db: &DatabaseConnection) -> anyhow::Result<()> {
    if mini_apps::Entity::find().count(db).await? > 0 {
        println!("  Mini-apps already exist, skipping...");
        return Ok(());
    }

    let apps = [
        (
            "Druk Weather",
            "Valley-level forecasts for all twenty dzongkhags.",
            "Thimphu Labs",
            dec!(0),
            dec!(4.60),
            1250,
            json!(["location"]),
        ),
        (
            "Tsechu Calendar",
            "Festival dates with reminders.",
            "Paro Digital",
            dec!(0),
            dec!(4.80),
            980,
            json!(["notifications"]),
        ),
        (
            "Ngultrum Wallet",
            "Track spending and Brownie Points rewards.",
            "Druk Fintech",
            dec!(49.00),
            dec!(4.30),
            410,
            json!(["wallet", "notifications"]),
        ),
    ];

    for (name, description, developer, price, rating, downloads, permissions) in apps {
        mini_apps::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            developer: Set(developer.to_string()),
            version: Set("1.0.0".to_string()),
            price: Set(price),
            rating: Set(rating),
            downloads: Set(downloads),
            active: Set(true),
            code_hash: Set(format!("0x{downloads:064x}")),
            permissions: Set(permissions),
            verified: Set(true),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        println!("  Created mini-app: {name}");
    }

    Ok(())
}

async fn seed_government_services(db: &DatabaseConnection) -> anyhow::Result<()> {
    if government_services::Entity::find().count(db).await? > 0 {
        println!("  Government services already exist, skipping...");
        return Ok(());
    }

    let services = [
        (
            "Business License",
            "Register a trade license for a new business.",
            "Ministry of Industry, Commerce and Employment",
            json!(["digital_residency"]),
            "5-7 working days",
            dec!(500.00),
        ),
        (
            "Work Permit",
            "Permit for non-nationals employed in Bhutan.",
            "Department of Labour",
            json!(["digital_residency", "employment_offer"]),
            "10 working days",
            dec!(1000.00),
        ),
        (
            "Land Record Certificate",
            "Certified extract of a thram record.",
            "National Land Commission",
            json!(["citizenship"]),
            "3 working days",
            dec!(100.00),
        ),
    ];

    for (service_name, description, department, credentials, processing_time, fee) in services {
        government_services::ActiveModel {
            service_name: Set(service_name.to_string()),
            description: Set(description.to_string()),
            department: Set(department.to_string()),
            contract_address: Set(None),
            is_active: Set(true),
            required_credentials: Set(credentials),
            processing_time: Set(Some(processing_time.to_string())),
            fee: Set(fee),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        println!("  Created government service: {service_name}");
    }

    Ok(())
}
