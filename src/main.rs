use std::env;

use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use snooze::adapters::{FileCredentialStore, TerminalHost};
use snooze::api::ApiClient;
use snooze::auth::Credentials;
use snooze::models::{NewStory, StoryList, User};
use snooze::traits::CredentialStore;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "\
snooze - a client for the Hack or Snooze story-sharing service

USAGE:
    snooze <command> [args]

COMMANDS:
    stories [count]              list stories in server order
    signup <username> <name>     create an account (password is prompted)
    login <username>             sign in (password is prompted)
    whoami                       show the saved session's profile
    post <title> <author> <url>  submit a new story
    favorite <story-id>          toggle a story's favorite status
    delete <story-id>            delete one of your stories
    logout                       discard the saved session
    help                         show this message

ENVIRONMENT:
    SNOOZE_API_URL               override the API base URL
    SNOOZE_LOG                   log filter (default: warn)";

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SNOOZE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();

    let client = match env::var("SNOOZE_API_URL") {
        Ok(url) => ApiClient::with_base_url(url),
        Err(_) => ApiClient::new(),
    };
    let store =
        FileCredentialStore::new().ok_or_else(|| eyre!("could not determine home directory"))?;
    let host = TerminalHost::new();

    match args.first().map(String::as_str) {
        Some("stories") => cmd_stories(&client, args.get(1)).await,
        Some("signup") => match (args.get(1), args.get(2)) {
            (Some(username), Some(name)) => cmd_signup(&client, &store, username, name).await,
            _ => bail!("usage: snooze signup <username> <name>"),
        },
        Some("login") => match args.get(1) {
            Some(username) => cmd_login(&client, &store, username).await,
            None => bail!("usage: snooze login <username>"),
        },
        Some("whoami") => cmd_whoami(&client, &store).await,
        Some("post") => match (args.get(1), args.get(2), args.get(3)) {
            (Some(title), Some(author), Some(url)) => {
                cmd_post(&client, &store, &host, title, author, url).await
            }
            _ => bail!("usage: snooze post <title> <author> <url>"),
        },
        // "unfavorite" is an alias: the operation is a toggle either way
        Some("favorite") | Some("unfavorite") => match args.get(1) {
            Some(story_id) => cmd_favorite(&client, &store, &host, story_id).await,
            None => bail!("usage: snooze favorite <story-id>"),
        },
        Some("delete") => match args.get(1) {
            Some(story_id) => cmd_delete(&client, &store, &host, story_id).await,
            None => bail!("usage: snooze delete <story-id>"),
        },
        Some("logout") => cmd_logout(&store).await,
        Some("--version") | Some("-V") => {
            println!("snooze {}", VERSION);
            Ok(())
        }
        Some("help") | Some("--help") | Some("-h") | None => {
            println!("{}", USAGE);
            Ok(())
        }
        Some(other) => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }
}

/// Restore the saved session or explain how to create one.
async fn require_session(client: &ApiClient, store: &FileCredentialStore) -> Result<User> {
    let creds = store.load().await?;
    let Some(Credentials {
        token: Some(token),
        username: Some(username),
    }) = creds
    else {
        bail!("no saved session; run `snooze login <username>` first");
    };

    match User::login_via_stored_credentials(client, &token, &username).await {
        Some(user) => Ok(user),
        None => bail!("the saved session is no longer valid; run `snooze login` again"),
    }
}

async fn save_session(store: &FileCredentialStore, user: &User) -> Result<()> {
    store
        .save(&Credentials::for_session(
            user.login_token.clone(),
            user.username.clone(),
        ))
        .await?;
    Ok(())
}

fn print_story(index: usize, story: &snooze::models::Story) {
    let host = story.host_name().unwrap_or_else(|| "unknown".to_string());
    println!("{:>3}. {} ({})", index, story.title, host);
    println!(
        "     by {} | posted by {} | id {}",
        story.author, story.username, story.story_id
    );
}

async fn cmd_stories(client: &ApiClient, count: Option<&String>) -> Result<()> {
    let limit = match count {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| eyre!("count must be a number, got '{}'", raw))?,
        None => 25,
    };

    let list = StoryList::fetch(client).await?;
    for (i, story) in list.stories.iter().take(limit).enumerate() {
        print_story(i + 1, story);
    }
    Ok(())
}

async fn cmd_signup(
    client: &ApiClient,
    store: &FileCredentialStore,
    username: &str,
    name: &str,
) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;
    let user = User::signup(client, username, &password, name).await?;
    save_session(store, &user).await?;
    println!("Welcome, {}! You are signed in as {}.", user.name, user.username);
    Ok(())
}

async fn cmd_login(client: &ApiClient, store: &FileCredentialStore, username: &str) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;
    let user = User::login(client, username, &password).await?;
    save_session(store, &user).await?;
    println!("Signed in as {}.", user.username);
    Ok(())
}

async fn cmd_whoami(client: &ApiClient, store: &FileCredentialStore) -> Result<()> {
    let user = require_session(client, store).await?;
    println!("{} ({})", user.username, user.name);
    println!("member since {}", user.created_at.format("%Y-%m-%d"));

    if !user.own_stories.is_empty() {
        println!("\nYour stories:");
        for (i, story) in user.own_stories.iter().enumerate() {
            print_story(i + 1, story);
        }
    }
    if !user.favorites.is_empty() {
        println!("\nYour favorites:");
        for (i, story) in user.favorites.iter().enumerate() {
            print_story(i + 1, story);
        }
    }
    Ok(())
}

async fn cmd_post(
    client: &ApiClient,
    store: &FileCredentialStore,
    host: &TerminalHost,
    title: &str,
    author: &str,
    url: &str,
) -> Result<()> {
    let mut user = require_session(client, store).await?;
    let mut list = StoryList::default();

    let story = list
        .add_story(
            client,
            host,
            &mut user,
            NewStory {
                title: title.to_string(),
                author: author.to_string(),
                url: url.to_string(),
            },
        )
        .await?;

    println!("Posted '{}' (id {}).", story.title, story.story_id);
    Ok(())
}

async fn cmd_favorite(
    client: &ApiClient,
    store: &FileCredentialStore,
    host: &TerminalHost,
    story_id: &str,
) -> Result<()> {
    let mut user = require_session(client, store).await?;
    user.toggle_favorite(client, host, story_id).await?;

    if user.is_favorite(story_id) {
        println!("Added {} to your favorites.", story_id);
    } else {
        println!("Removed {} from your favorites.", story_id);
    }
    Ok(())
}

async fn cmd_delete(
    client: &ApiClient,
    store: &FileCredentialStore,
    host: &TerminalHost,
    story_id: &str,
) -> Result<()> {
    let mut user = require_session(client, store).await?;
    user.delete_story(client, host, story_id).await?;
    println!("Deleted {}.", story_id);
    Ok(())
}

async fn cmd_logout(store: &FileCredentialStore) -> Result<()> {
    store.clear().await?;
    println!("Signed out.");
    Ok(())
}
