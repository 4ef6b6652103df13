//! CLI commands

use anyhow::{Result, bail};
use clap::Subcommand;
use fitcoach_http::WorkoutPlan;
use fitcoach_session::{ApiClient, AuthGuard, AuthService};
use std::rc::Rc;
use tracing::info;
use url::Url;

use crate::env::FileEnvironment;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the identity provider sign-in URL
    Login,

    /// Finish signing in with the URL the provider redirected the browser to
    Callback {
        /// Full redirect URL, including `?code=`
        url: Url,
    },

    /// Show the signed-in user and token state
    Status,

    /// Sign out and print the provider logout URL
    Logout,

    /// Workout plan operations
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },

    /// Exercise operations
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show a workout plan with grouped exercises expanded
    Show { plan_id: String },

    /// Delete a workout plan
    Delete { plan_id: String },
}

#[derive(Subcommand)]
pub enum ExerciseCommands {
    /// Delete an exercise
    Delete { exercise_id: String },
}

/// What every command runs against
pub struct Session {
    pub env: Rc<FileEnvironment>,
    pub auth: Rc<AuthService>,
}

impl Commands {
    pub async fn execute(self, session: &Session) -> Result<()> {
        let auth = &session.auth;
        match self {
            Commands::Login => auth.login(),
            Commands::Callback { url } => {
                session.env.set_current_url(url);
                auth.handle_callback().await;
                match auth.user() {
                    Some(user) if auth.is_logged_in() => {
                        println!("Signed in as {} <{}>", user.name, user.email);
                    }
                    _ => bail!("Sign-in failed, see the log for details"),
                }
            }
            Commands::Status => print_status(auth),
            Commands::Logout => auth.logout(),
            Commands::Plan { command } => {
                let api = authorized_client(auth)?;
                match command {
                    PlanCommands::Show { plan_id } => {
                        let plan = api.get_workout_plan(&plan_id).await?;
                        print_plan(&plan);
                    }
                    PlanCommands::Delete { plan_id } => {
                        let response = api.delete_workout_plan(&plan_id).await?;
                        info!(plan_id, "Workout plan deleted");
                        println!("{}", response.message);
                    }
                }
            }
            Commands::Exercise {
                command: ExerciseCommands::Delete { exercise_id },
            } => {
                let api = authorized_client(auth)?;
                let response = api.delete_exercise(&exercise_id).await?;
                info!(exercise_id, "Exercise deleted");
                println!("{}", response.message);
            }
            Commands::Config => {
                println!("{}", serde_json::to_string_pretty(auth.config())?);
            }
        }
        Ok(())
    }
}

fn authorized_client(auth: &Rc<AuthService>) -> Result<ApiClient> {
    if !AuthGuard::new(Rc::clone(auth)).can_activate() {
        bail!("Not signed in. Open the URL above, then run `fitcoach callback <redirect-url>`");
    }
    Ok(ApiClient::new(Rc::clone(auth))?)
}

fn print_status(auth: &AuthService) {
    match auth.user() {
        Some(user) => println!("User:      {} <{}> ({})", user.name, user.email, user.id),
        None => println!("User:      -"),
    }
    println!("Logged in: {}", auth.is_logged_in());
    println!(
        "Tokens:    id={} access={}",
        auth.id_token().is_some(),
        auth.access_token().is_some()
    );
}

fn print_plan(plan: &WorkoutPlan) {
    println!("{} ({})", plan.name, plan.plan_id);
    if let Some(description) = &plan.description {
        println!("  {description}");
    }
    for session in &plan.sessions {
        println!("\n  {}", session.name);
        for exercise in session.flattened_exercises() {
            println!("    - {} [{}]", exercise.name, exercise.id);
        }
    }
}
