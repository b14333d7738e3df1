mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use quicktweet_client::screens::{AdminDashboard, AdminView, FeedScreen, GroupPage, ProfileScreen};
use quicktweet_client::{client, ClientConfig, PostQuery, Session};
use quicktweet_common::payloads::{AccountCredentials, NewAccount, PasswordReset, ProfileUpdate};
use quicktweet_common::Status;

#[derive(Parser, Debug)]
#[clap(name = "quicktweet")]
#[clap(about = "Browse and moderate a QuickTweet server from the terminal", long_about = None)]
struct Cli {
    /// Overrides QUICKTWEET_API_URL.
    #[clap(long)]
    api_url: Option<String>,
    #[clap(short, long)]
    username: Option<String>,
    #[clap(short, long)]
    password: Option<String>,
    #[clap(short, long)]
    verbose: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Feed {
        #[clap(long, default_value_t = 1)]
        page: usize,
        #[clap(long, default_value = "")]
        text: String,
        #[clap(long, default_value = "")]
        user: String,
        #[clap(long, default_value = "")]
        interest: String,
    },
    Post {
        content: String,
    },
    Profile {
        username: String,
    },
    /// Send, accept or withdraw a friendship with USERNAME.
    Friend {
        username: String,
    },
    Edit {
        #[clap(long)]
        bio: Option<String>,
        #[clap(long)]
        photo: Option<String>,
        #[clap(long, value_parser = parse_status)]
        status: Option<Status>,
        #[clap(long = "interest")]
        interests: Vec<String>,
    },
    /// Set your availability: available, busy, away or recent.
    Status {
        #[clap(value_parser = parse_status)]
        status: Status,
    },
    Group {
        interest: String,
    },
    Search {
        query: String,
    },
    Admin {
        /// Show all users instead of pending account requests.
        #[clap(long)]
        users: bool,
        #[clap(long, default_value_t = 1)]
        page: usize,
    },
    Approve {
        username: String,
    },
    Reject {
        username: String,
    },
    Role {
        user_id: i64,
    },
    Delete {
        user_id: i64,
    },
    Register {
        email: String,
        #[clap(long)]
        question: String,
        #[clap(long)]
        answer: String,
    },
    ResetPassword {
        #[clap(long)]
        answer: Option<String>,
    },
}

fn parse_status(raw: &str) -> std::result::Result<Status, String> {
    match raw.to_lowercase().as_str() {
        "available" => Ok(Status::Available),
        "busy" => Ok(Status::Busy),
        "away" => Ok(Status::Away),
        "last seen recently" | "recent" => Ok(Status::LastSeenRecently),
        _ => Err(format!("unknown status {raw:?}")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let mut config = ClientConfig::load().context("reading configuration")?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url);
    }

    let username = cli.username.clone().context("--username is required")?;
    match cli.command {
        Command::Register { email, question, answer } => {
            let password = cli.password.context("--password is required")?;
            let account = NewAccount {
                username,
                email,
                password,
                security_question: question,
                security_question_answer: answer,
            };
            println!("{}", client::register(&config, &account).await?);
            return Ok(());
        }
        Command::ResetPassword { answer } => {
            let Some(answer) = answer else {
                println!("{}", client::security_question(&config, &username).await?);
                return Ok(());
            };
            let password = cli.password.context("--password is required")?;
            let reset = PasswordReset { password, answer };
            println!("{}", client::reset_password(&config, &username, &reset).await?);
            return Ok(());
        }
        command => {
            let credentials = AccountCredentials {
                username,
                password: cli.password.clone().context("--password is required")?,
            };
            let session = Session::login(config, &credentials).await.context("logging in")?;
            let outcome = run(&session, command).await;
            session.logout();
            outcome
        }
    }
}

async fn run(session: &Session, command: Command) -> Result<()> {
    match command {
        Command::Feed { page, text, user, interest } => {
            let mut feed = FeedScreen::new(session.config());
            feed.refresh(session).await;
            feed.filter(PostQuery::new(text, user, interest));
            feed.go_to(page);
            render::feed(&feed);
        }
        Command::Post { content } => {
            let mut feed = FeedScreen::new(session.config());
            let post = feed.publish(session, &content).await?;
            println!("posted #{}", post.id);
            render::feed(&feed);
        }
        Command::Profile { username } => {
            let mut profile = ProfileScreen::new(username);
            profile.refresh(session).await;
            render::profile(&profile);
        }
        Command::Friend { username } => {
            let mut profile = ProfileScreen::new(username);
            profile.refresh(session).await;
            profile.toggle_friendship(session).await?;
            render::profile(&profile);
        }
        Command::Edit { bio, photo, status, interests } => {
            let mut profile = ProfileScreen::new(session.username());
            profile.refresh(session).await;
            let current = profile.profile().map(|p| p.user.clone()).unwrap_or_default();
            let update = ProfileUpdate {
                username: session.username().to_string(),
                bio: bio.or(current.bio),
                photo: photo.or(current.photo),
                status: status.or(current.status),
                interests: if interests.is_empty() { current.interests } else { Some(interests) },
            };
            profile.edit(session, update).await?;
            render::profile(&profile);
        }
        Command::Status { status } => {
            let mut profile = ProfileScreen::new(session.username());
            profile.refresh(session).await;
            profile.set_status(session, status).await?;
            render::profile(&profile);
        }
        Command::Group { interest } => {
            let mut group = GroupPage::new(interest);
            group.refresh(session).await;
            render::group(&group);
        }
        Command::Search { query } => {
            for user in client::search_users(session, &query).await? {
                println!("{}", render::user_line(&user));
            }
        }
        Command::Admin { users, page } => {
            let mut dashboard = admin(session).await?;
            if users {
                dashboard.set_view(AdminView::Users);
            }
            dashboard.go_to(page);
            render::admin(&dashboard);
        }
        Command::Approve { username } => {
            let mut dashboard = admin(session).await?;
            dashboard.accept(session, &username).await?;
            render::admin(&dashboard);
        }
        Command::Reject { username } => {
            let mut dashboard = admin(session).await?;
            dashboard.reject(session, &username).await?;
            render::admin(&dashboard);
        }
        Command::Role { user_id } => {
            let mut dashboard = admin(session).await?;
            dashboard.set_view(AdminView::Users);
            dashboard.change_role(session, user_id).await?;
            render::admin(&dashboard);
        }
        Command::Delete { user_id } => {
            let mut dashboard = admin(session).await?;
            dashboard.set_view(AdminView::Users);
            dashboard.delete(session, user_id).await?;
            render::admin(&dashboard);
        }
        Command::Register { .. } | Command::ResetPassword { .. } => unreachable!("handled before login"),
    }
    Ok(())
}

async fn admin(session: &Session) -> Result<AdminDashboard> {
    if !session.is_admin() {
        bail!("{} is not an administrator", session.username());
    }
    let mut dashboard = AdminDashboard::new(session.config());
    dashboard.refresh(session).await;
    Ok(dashboard)
}
