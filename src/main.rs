//! Folio command-line entry point.
//!
//! Loads configuration, installs tracing, then runs one subcommand against
//! the bookshop API. Command output goes to stdout; logs and failures go to
//! stderr.

mod cli;

use clap::Parser;
use cli::{AdminCommand, BookCommand, CartCommand, Cli, Command, ListArgs, OrdersCommand, UsersCommand};
use folio::api::{ApiClient, CancellationToken, ReqwestTransport};
use folio::app::capabilities::{self, Capability};
use folio::app::{fetch, handle_event, try_fetch, Action, DispatchOutcome, FetchOutcome, ListState, NoticeLevel, Operations};
use folio::domain::{AuthState, BookDraft, Credentials, FolioError, Record, Registration, Result, Revenue};
use folio::observability::init_tracing;
use folio::ui::{self, Tabular};
use folio::{infrastructure, initialize, Config, Folio};
use std::future::Future;
use std::process::ExitCode;

const DEFAULT_WIDTH: usize = 100;

/// Text to print plus whether the command achieved what was asked.
struct Report {
    output: String,
    success: bool,
}

impl Report {
    const fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("folio: {e}");
            return ExitCode::FAILURE;
        }
    };
    let _guard = init_tracing(&config);

    let mut folio = match initialize(config) {
        Ok(folio) => folio,
        Err(e) => {
            eprintln!("folio: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &mut folio).await {
        Ok(report) => {
            print!("{}", report.output);
            if report.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("folio: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().unwrap_or_else(infrastructure::config_file);
    let mut config = Config::load(&path)?;
    if cli.api_base.is_some() {
        config.apply_env(cli.api_base.clone());
        config.validate()?;
    }
    Ok(config)
}

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .filter(|&w: &usize| w >= 40)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Cancels `token` on Ctrl-C, so an interrupted request leaves state alone.
fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        let interrupted = tokio::select! {
            result = tokio::signal::ctrl_c() => result.is_ok(),
            () = token.cancelled() => false,
        };
        if interrupted {
            tracing::info!("interrupted");
            token.cancel();
        }
    });
}

#[tracing::instrument(level = "debug", skip_all)]
async fn run(command: Command, folio: &mut Folio) -> Result<Report> {
    let auth = folio.sessions.load();
    let page_size = folio.config.page_size;

    match command {
        Command::Login { email, password } => {
            let session = folio.client.login(&Credentials { email, password }).await?;
            folio.sessions.save(&session)?;
            tracing::info!(user = %session.user.email, role = %session.user.role, "signed in");
            Ok(Report::ok(format!(
                "Signed in as {} ({})\n",
                session.user.name, session.user.role
            )))
        }
        Command::Logout => {
            folio.sessions.clear()?;
            Ok(Report::ok("Signed out.\n".to_string()))
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let registration = Registration {
                name,
                email,
                password,
            };
            registration.validate()?;
            let user = folio.client.register(&registration).await?;
            let email = user.map_or(registration.email, |u| u.email);
            Ok(Report::ok(format!(
                "Account created for {email}. Sign in with `folio login`.\n"
            )))
        }
        Command::Whoami => match auth.session() {
            Some(session) => Ok(Report::ok(ui::render_profile(
                session,
                &capabilities::dashboard(&auth),
            ))),
            None => Ok(Report::ok("Not signed in.\n".to_string())),
        },
        Command::Books(args) => {
            let mut books = ListState::new(page_size);
            browse(&mut books, &args, || folio.client.list_books()).await
        }
        Command::Book { id } => {
            let book = folio.client.get_book(&id).await?;
            Ok(Report::ok(ui::render_book(&book)))
        }
        Command::Cart { command } => run_cart(command, folio, &auth).await,
        Command::Checkout => checkout(folio, &auth).await,
        Command::MyOrders(args) => {
            capabilities::require(&auth, Capability::ViewOwnOrders)?;
            let mut orders = ListState::new(page_size);
            browse(&mut orders, &args, || folio.client.my_orders(&auth)).await
        }
        Command::Admin { command } => run_admin(command, &folio.client, &auth, page_size).await,
    }
}

async fn run_cart(command: CartCommand, folio: &mut Folio, auth: &AuthState) -> Result<Report> {
    capabilities::require(auth, Capability::ManageCart)?;
    let mut cart = folio.sessions.cart();

    let message = match command {
        CartCommand::Add { book_id, quantity } => {
            let book = folio.client.get_book(&book_id).await?;
            let held = cart.add(&book, quantity)?;
            folio.sessions.save_cart(&cart)?;
            format!("{held} × \"{}\" in cart\n", book.title)
        }
        CartCommand::Set { book_id, quantity } => {
            cart.set_quantity(&book_id, quantity)?;
            folio.sessions.save_cart(&cart)?;
            ui::render_cart(&cart)
        }
        CartCommand::Remove { book_id } => {
            cart.remove(&book_id)?;
            folio.sessions.save_cart(&cart)?;
            ui::render_cart(&cart)
        }
        CartCommand::Show => ui::render_cart(&cart),
        CartCommand::Clear => {
            cart.clear();
            folio.sessions.save_cart(&cart)?;
            "Cart cleared.\n".to_string()
        }
    };
    Ok(Report::ok(message))
}

async fn checkout(folio: &mut Folio, auth: &AuthState) -> Result<Report> {
    let mut cart = folio.sessions.cart();
    let cancel = CancellationToken::new();
    cancel_on_interrupt(cancel.clone());

    let order = Operations::new(&folio.client, auth)
        .checkout(&cart, &cancel)
        .await;
    cancel.cancel();
    let order = order?;

    cart.clear();
    folio.sessions.save_cart(&cart)?;
    Ok(Report::ok(ui::render_order_placed(order.as_ref())))
}

async fn run_admin(
    command: AdminCommand,
    client: &ApiClient<ReqwestTransport>,
    auth: &AuthState,
    page_size: usize,
) -> Result<Report> {
    let ops = Operations::new(client, auth);

    match command {
        AdminCommand::Book { command } => {
            capabilities::require(auth, Capability::ManageBooks)?;
            let mut books = ListState::new(page_size);
            load(&mut books, client.list_books()).await?;
            let outcome = match command {
                BookCommand::Create(fields) => {
                    let draft = BookDraft::from(fields);
                    draft.validate()?;
                    ops.create_book(&mut books, &draft).await
                }
                BookCommand::Update { id, fields } => {
                    let current = books
                        .get(&id)
                        .ok_or_else(|| FolioError::NotFound(id.clone()))?;
                    let draft = fields.apply(BookDraft::from_book(current));
                    draft.validate()?;
                    ops.update_book(&mut books, &id, &draft).await
                }
                BookCommand::Delete { id } => ops.delete_book(&mut books, &id).await,
            };
            Ok(settle(&books, &outcome))
        }
        AdminCommand::Orders { command } => {
            capabilities::require(auth, Capability::ManageOrders)?;
            let mut orders = ListState::new(page_size);
            match command {
                OrdersCommand::List(args) => browse(&mut orders, &args, || client.all_orders(auth)).await,
                OrdersCommand::Status { id, status } => {
                    load(&mut orders, client.all_orders(auth)).await?;
                    let outcome = ops.set_order_status(&mut orders, &id, status).await;
                    Ok(settle(&orders, &outcome))
                }
                OrdersCommand::Delete { id } => {
                    load(&mut orders, client.all_orders(auth)).await?;
                    let outcome = ops.delete_order(&mut orders, &id).await;
                    Ok(settle(&orders, &outcome))
                }
            }
        }
        AdminCommand::Revenue => {
            capabilities::require(auth, Capability::ViewRevenue)?;
            let revenue = client.revenue(auth).await?;
            let mut output = format!("Revenue: {}", ui::money(revenue.total()));
            if let Revenue::Summary {
                orders: Some(orders),
                ..
            } = revenue
            {
                output.push_str(&format!(" across {orders} orders"));
            }
            output.push('\n');
            Ok(Report::ok(output))
        }
        AdminCommand::Users { command } => {
            capabilities::require(auth, Capability::ManageUsers)?;
            let mut users = ListState::new(page_size);
            match command {
                UsersCommand::List(args) => browse(&mut users, &args, || client.all_users(auth)).await,
                UsersCommand::Toggle { id } => {
                    load(&mut users, client.all_users(auth)).await?;
                    let outcome = ops.toggle_user(&mut users, &id).await;
                    Ok(settle(&users, &outcome))
                }
            }
        }
    }
}

/// Fills `state` before a mutation. A failed or interrupted load aborts the
/// command, so no mutation is sent against a list that never arrived.
async fn load<T, F>(state: &mut ListState<T>, request: F) -> Result<()>
where
    T: Record,
    F: Future<Output = Result<Vec<T>>>,
{
    cancel_on_interrupt(state.cancel_token().clone());
    let count = try_fetch(state, request).await?;
    tracing::debug!(count, "list loaded before mutation");
    Ok(())
}

/// Loads a list, replays the search/sort/page options as list events and
/// renders the resulting page.
async fn browse<T, L, F>(state: &mut ListState<T>, args: &ListArgs, request: L) -> Result<Report>
where
    T: Record + Tabular,
    L: Fn() -> F,
    F: Future<Output = Result<Vec<T>>>,
{
    cancel_on_interrupt(state.cancel_token().clone());
    let mut events = args.events().into_iter();
    let mut pending = vec![Action::Fetch];

    loop {
        for action in std::mem::take(&mut pending) {
            match action {
                Action::Fetch => {
                    if fetch(state, request()).await == FetchOutcome::Cancelled {
                        return Err(FolioError::Cancelled);
                    }
                }
                Action::Notify(notice) => state.push_notice(notice),
                Action::Exit => return Err(FolioError::Cancelled),
            }
        }
        let Some(event) = events.next() else {
            break;
        };
        let (_, actions) = handle_event(state, &event)?;
        pending = actions;
    }

    let success = state.error().is_none()
        && state.notices().iter().all(|n| n.level != NoticeLevel::Error);
    state.close();
    Ok(Report {
        output: ui::render(state, terminal_width()),
        success,
    })
}

/// Renders the list after a mutation; the cache was updated in place.
fn settle<T: Record + Tabular>(state: &ListState<T>, outcome: &DispatchOutcome) -> Report {
    state.close();
    Report {
        output: ui::render(state, terminal_width()),
        success: matches!(outcome, DispatchOutcome::Applied | DispatchOutcome::Stale),
    }
}
