use dotenvy::dotenv;

use gurukul::logging::init_tracing;
use gurukul::router::init_router;
use gurukul::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "create-admin" {
        handle_create_admin(args).await;
        return;
    }

    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Server running on http://{}", bind_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_addr);
    axum::serve(listener, app).await.expect("Server error");
}

async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 5 {
        eprintln!("Usage: {} create-admin <full_name> <email> <password>", args[0]);
        std::process::exit(1);
    }

    let full_name = &args[2];
    let email = &args[3];
    let password = &args[4];

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match gurukul::cli::create_admin(&pool, full_name, email, password).await {
        Ok(()) => {
            println!("Admin created successfully!");
            println!("   Email: {}", email);
            println!("   Name: {}", full_name);
        }
        Err(e) => {
            eprintln!("Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}
