use clap::Parser;
use user_client::{NewUser, UserClient, UserUpdate};

#[derive(Parser, Debug)]
#[clap(about = "Manage user records through the user API")]
struct Cli {
    /// Base URL of the user API.
    #[clap(short, long, env = "USER_API_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// List every user.
    List,
    /// Show one user.
    Get { id: String },
    Create {
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
        #[clap(long)]
        age: i64,
    },
    /// Change only the given fields.
    Update {
        id: String,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        email: Option<String>,
        #[clap(long)]
        age: Option<i64>,
    },
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let client = UserClient::new(&args.server)?;

    match args.command {
        Command::List => {
            let users = client.list_users().await?;
            println!("Users ({})", users.len());
            for user in users {
                println!("- {user}");
            }
        }
        Command::Get { id } => {
            let user = client.get_user(&id).await?;
            println!("{user}");
        }
        Command::Create { name, email, age } => {
            let user = client.create_user(&NewUser { name, email, age }).await?;
            println!("User created! ID: {}", user.id);
        }
        Command::Update {
            id,
            name,
            email,
            age,
        } => {
            let user = client
                .update_user(&id, &UserUpdate { name, email, age })
                .await?;
            println!("User updated: {user}");
        }
        Command::Delete { id } => {
            client.delete_user(&id).await?;
            println!("User deleted!");
        }
    }

    Ok(())
}
