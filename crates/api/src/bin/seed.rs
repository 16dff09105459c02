//! Demo data loader.
//!
//! Clears users and products, then inserts the demo admin, one demo
//! customer, and a small bilingual catalog:
//!
//! ```bash
//! cargo run -p matjar-api --bin seed
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::Utc;
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matjar_api::config::ApiConfig;
use matjar_api::db;
use matjar_api::db::products::ProductRepository;
use matjar_api::db::users::UserRepository;
use matjar_api::models::product::Product;
use matjar_api::models::user::User;
use matjar_api::services::auth::hash_password;
use matjar_core::{Email, Role, UserId};

#[tokio::main]
async fn main() {
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "seed=info,matjar_api=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // Replace any previous demo data
    sqlx::query("DELETE FROM users")
        .execute(&pool)
        .await
        .expect("Failed to clear users");
    sqlx::query("DELETE FROM products")
        .execute(&pool)
        .await
        .expect("Failed to clear products");

    let users = demo_users();
    let user_repo = UserRepository::new(&pool);
    for user in &users {
        user_repo.create(user).await.expect("Failed to insert user");
    }

    let products = demo_products();
    let product_repo = ProductRepository::new(&pool);
    for product in &products {
        product_repo
            .create(product)
            .await
            .expect("Failed to insert product");
    }

    tracing::info!(
        "seeded {} users and {} products",
        users.len(),
        products.len()
    );
    tracing::info!("admin login: admin@store.com / admin123");
    tracing::info!("customer login: user@test.com / user123");
}

fn demo_users() -> Vec<User> {
    vec![
        demo_user("المشرف", "admin@store.com", "admin123", Role::Admin, None, None),
        demo_user(
            "محمد أحمد",
            "user@test.com",
            "user123",
            Role::User,
            Some("الرياض، حي النخيل"),
            Some("0501234567"),
        ),
    ]
}

fn demo_user(
    name: &str,
    email: &str,
    password: &str,
    role: Role,
    address: Option<&str>,
    phone: Option<&str>,
) -> User {
    User {
        id: UserId::generate(),
        name: name.to_owned(),
        email: Email::parse(email).expect("demo email is valid"),
        password_hash: hash_password(password).expect("demo password hashes"),
        role,
        address: address.map(str::to_owned),
        phone: phone.map(str::to_owned),
        created_at: Utc::now(),
    }
}

fn demo_products() -> Vec<Product> {
    [
        (
            "لابتوب Dell XPS 13",
            "لابتوب خفيف الوزن بمعالج قوي مثالي للعمل والدراسة",
            4500,
            "إلكترونيات",
            "https://images.unsplash.com/photo-1593642632823-8f785ba67e45?w=300",
            10,
        ),
        (
            "سماعات Sony WH-1000XM5",
            "سماعات لاسلكية مع إلغاء ضوضاء متقدم",
            1200,
            "إلكترونيات",
            "https://images.unsplash.com/photo-1546435770-a3e426bf472b?w=300",
            20,
        ),
        (
            "ساعة Apple Watch Series 9",
            "ساعة ذكية مع مستشعرات صحية متقدمة",
            1800,
            "إكسسوارات",
            "https://images.unsplash.com/photo-1579586337278-3befd40fd17a?w=300",
            12,
        ),
        (
            "iPad Air M2",
            "تابلت متعدد الاستخدامات بشاشة 10.9 بوصة",
            2800,
            "إلكترونيات",
            "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?w=300",
            8,
        ),
        (
            "كاميرا Canon EOS R6",
            "كاميرا احترافية بدقة 20 ميجابكسل",
            9500,
            "كاميرات",
            "https://images.unsplash.com/photo-1516035069371-29a1b244cc32?w=300",
            5,
        ),
        (
            "PlayStation 5",
            "جهاز ألعاب من الجيل التالي",
            2100,
            "ألعاب",
            "https://images.unsplash.com/photo-1606813907291-d86efa9b94db?w=300",
            7,
        ),
        (
            "شاشة Samsung 4K",
            "شاشة 55 بوصة بتقنية QLED",
            3200,
            "إلكترونيات",
            "https://images.unsplash.com/photo-1593359677879-a4bb92f829d1?w=300",
            6,
        ),
    ]
    .into_iter()
    .map(|(name, description, price, category, image, stock)| {
        Product::new(
            name.to_owned(),
            description.to_owned(),
            Decimal::from(price),
            category.to_owned(),
            image.to_owned(),
            stock,
        )
    })
    .collect()
}
