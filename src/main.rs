//! Admin console - command line entry point
//!
//! Lists and filters the resources of the investment platform (deposits,
//! withdrawals, users, community messages, support tickets, promo codes and
//! plans) and runs the moderation actions on them.
use admin_console::{
    renderer_for, AdminError, AnnouncementInteractor, AppConfig, CatalogInteractor,
    CommunityInteractor, ConsoleView, FetchOutcome, FilterKey, FinancialInteractor, ListPresenter,
    ListPresenterImpl, NotificationDraft, NotificationPresenter, NotificationPresenterImpl,
    ResourceKind, ResourceList, ServiceContainer, SessionStatus, SortDirection,
    SupportInteractor, TableView, TicketStatus, UserInteractor, DEFAULT_NOTIFICATION_TYPE,
};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{info, warn};
use std::sync::Arc;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Base URL of the admin API (overrides ADMIN_API_BASE_URL)
    #[clap(long)]
    api_url: Option<String>,
    /// Bearer credential of an existing admin session
    #[clap(long)]
    token: Option<String>,
    /// Admin username or phone to sign in with
    #[clap(long)]
    username: Option<String>,
    #[clap(long)]
    password: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List deposits
    Deposits(ListArgs),
    /// List withdrawals
    Withdrawals(ListArgs),
    /// List users
    Users(ListArgs),
    /// List community messages
    Messages(ListArgs),
    /// List admin notifications
    Notifications(ListArgs),
    /// List support tickets
    Tickets(ListArgs),
    /// List promo codes
    PromoCodes(ListArgs),
    /// List investment plans
    Plans(ListArgs),
    ConfirmDeposit {
        id: i64,
        #[clap(long)]
        notes: Option<String>,
    },
    RejectDeposit {
        id: i64,
        #[clap(long)]
        notes: Option<String>,
    },
    ApproveWithdrawal {
        id: i64,
        #[clap(long)]
        notes: Option<String>,
        /// Payout transaction hash; generated when omitted
        #[clap(long)]
        tx_hash: Option<String>,
    },
    RejectWithdrawal {
        id: i64,
        #[clap(long)]
        notes: Option<String>,
    },
    BanUser {
        id: i64,
        #[clap(long)]
        reason: String,
        /// Ban length in days; permanent when omitted
        #[clap(long)]
        days: Option<u32>,
    },
    UnbanUser {
        id: i64,
    },
    /// Delete every community message
    DeleteAllMessages,
    /// Move a support ticket to OPEN, IN_PROGRESS or CLOSED
    UpdateTicket {
        id: i64,
        status: TicketStatus,
    },
    ActivatePromoCode {
        id: i64,
    },
    DeactivatePromoCode {
        id: i64,
    },
    DeletePromoCode {
        id: i64,
    },
    /// Activate or deactivate an investment plan
    TogglePlan {
        id: i64,
    },
    DeletePlan {
        id: i64,
    },
    /// Send a notification to every user
    Broadcast(DraftArgs),
    /// Send a notification to one user
    NotifyUser {
        user_id: i64,
        #[command(flatten)]
        draft: DraftArgs,
    },
    MarkNotificationRead {
        id: i64,
    },
    MarkAllNotificationsRead,
    /// Poll admin notifications until interrupted
    WatchNotifications {
        /// Stop after this many updates
        #[clap(long)]
        ticks: Option<u32>,
    },
}

#[derive(Debug, clap::Args)]
struct DraftArgs {
    #[clap(long)]
    title: String,
    #[clap(long)]
    message: String,
    #[clap(long = "type", default_value = DEFAULT_NOTIFICATION_TYPE)]
    notification_type: String,
}

impl DraftArgs {
    fn draft(&self) -> NotificationDraft {
        NotificationDraft::new(&self.title, &self.message).with_type(&self.notification_type)
    }
}

#[derive(Debug, Default, clap::Args)]
struct ListArgs {
    /// Zero-based page number
    #[clap(long, default_value_t = 0)]
    page: u32,
    #[clap(long)]
    status: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[clap(long)]
    from: Option<String>,
    /// End date (YYYY-MM-DD)
    #[clap(long)]
    to: Option<String>,
    #[clap(long)]
    min_amount: Option<String>,
    #[clap(long)]
    max_amount: Option<String>,
    /// Deposit transaction hash
    #[clap(long)]
    hash: Option<String>,
    /// Withdrawal wallet address
    #[clap(long)]
    wallet: Option<String>,
    #[clap(long = "user")]
    filter_username: Option<String>,
    /// Quick filter key, e.g. pending or high-value
    #[clap(long, conflicts_with_all = ["page", "status", "from", "to", "min_amount", "max_amount", "hash", "wallet", "filter_username"])]
    preset: Option<String>,
    /// Column to sort the page by
    #[clap(long)]
    sort: Option<String>,
    /// Sort descending instead of ascending
    #[clap(long, requires = "sort")]
    desc: bool,
    /// Client-side search over the loaded page
    #[clap(long)]
    search: Option<String>,
}

impl ListArgs {
    fn filters(&self) -> Vec<(FilterKey, &str)> {
        [
            (FilterKey::Status, &self.status),
            (FilterKey::StartDate, &self.from),
            (FilterKey::EndDate, &self.to),
            (FilterKey::MinAmount, &self.min_amount),
            (FilterKey::MaxAmount, &self.max_amount),
            (FilterKey::TransactionHash, &self.hash),
            (FilterKey::WalletAddress, &self.wallet),
            (FilterKey::Username, &self.filter_username),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
        .collect()
    }
}

async fn show_list(
    list: Arc<ResourceList>,
    view: Arc<ConsoleView<std::io::Stdout>>,
    args: &ListArgs,
) -> anyhow::Result<()> {
    let presenter = ListPresenterImpl::new(list.clone(), renderer_for(list.resource()), view);

    if let Some(key) = &args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        presenter.sort_by(key, direction)?;
    }
    if let Some(query) = &args.search {
        list.set_search(query);
    }

    let outcome = match &args.preset {
        Some(preset) => list.select_quick_preset(preset).await?,
        None => {
            for (key, value) in args.filters() {
                list.edit_filter(key, value)?;
            }
            list.apply_local_at(args.page).await
        }
    };

    presenter.present(outcome).await
}

async fn report(
    list: Arc<ResourceList>,
    view: Arc<ConsoleView<std::io::Stdout>>,
    result: Result<FetchOutcome, admin_console::ApiError>,
    success: &str,
    failure: &str,
) -> anyhow::Result<()> {
    let presenter = ListPresenterImpl::new(list.clone(), renderer_for(list.resource()), view);
    presenter.report_action(result, success, failure).await
}

async fn announce(
    view: Arc<ConsoleView<std::io::Stdout>>,
    result: Result<(), AdminError>,
    success: &str,
) -> anyhow::Result<()> {
    match result {
        Ok(()) => view.display_success(success.to_string()).await,
        Err(AdminError::Api(err)) => match err.session_end() {
            Some(reason) => view.display_session_ended(reason).await,
            None => view.display_error(err.to_string()).await,
        },
        Err(err) => view.display_error(err.to_string()).await,
    }
}

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting admin console v{}", admin_console::VERSION);

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    if let Some(url) = args.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if args.token.is_some() {
        config.auth_token = args.token;
    }
    if args.username.is_some() {
        config.username = args.username;
    }
    if args.password.is_some() {
        config.password = args.password;
    }

    let services = ServiceContainer::new(config).context("Failed to initialize services")?;
    let session = services.session();

    if !session.is_authenticated() {
        match services.config().credentials() {
            Some((username, password)) => {
                services
                    .auth_service()
                    .login(username, password)
                    .await
                    .context("Login failed")?;
            }
            None => warn!("No credential configured, requests will be sent unauthenticated"),
        }
    }

    let view = Arc::new(ConsoleView::stdout());

    match args.command {
        Command::Deposits(list_args) => {
            show_list(services.resource_list(ResourceKind::Deposits), view, &list_args).await?
        }
        Command::Withdrawals(list_args) => {
            show_list(services.resource_list(ResourceKind::Withdrawals), view, &list_args).await?
        }
        Command::Users(list_args) => {
            show_list(services.resource_list(ResourceKind::Users), view, &list_args).await?
        }
        Command::Messages(list_args) => {
            show_list(
                services.resource_list(ResourceKind::CommunityMessages),
                view,
                &list_args,
            )
            .await?
        }
        Command::Notifications(list_args) => {
            show_list(
                services.resource_list(ResourceKind::Notifications),
                view,
                &list_args,
            )
            .await?
        }
        Command::Tickets(list_args) => {
            show_list(services.resource_list(ResourceKind::SupportTickets), view, &list_args).await?
        }
        Command::PromoCodes(list_args) => {
            show_list(services.resource_list(ResourceKind::PromoCodes), view, &list_args).await?
        }
        Command::Plans(list_args) => {
            show_list(services.resource_list(ResourceKind::Plans), view, &list_args).await?
        }
        Command::ConfirmDeposit { id, notes } => {
            let finance = services.financial_interactor();
            let result = finance.confirm_deposit(id, notes.as_deref()).await;
            report(
                finance.deposits(),
                view,
                result,
                "Deposit confirmed successfully",
                "Failed to confirm deposit",
            )
            .await?
        }
        Command::RejectDeposit { id, notes } => {
            let finance = services.financial_interactor();
            let result = finance.reject_deposit(id, notes.as_deref()).await;
            report(
                finance.deposits(),
                view,
                result,
                "Deposit rejected successfully",
                "Failed to reject deposit",
            )
            .await?
        }
        Command::ApproveWithdrawal { id, notes, tx_hash } => {
            let finance = services.financial_interactor();
            let result = finance
                .approve_withdrawal(id, notes.as_deref(), tx_hash.as_deref())
                .await;
            report(
                finance.withdrawals(),
                view,
                result,
                "Withdrawal approved successfully",
                "Failed to approve withdrawal",
            )
            .await?
        }
        Command::RejectWithdrawal { id, notes } => {
            let finance = services.financial_interactor();
            let result = finance.reject_withdrawal(id, notes.as_deref()).await;
            report(
                finance.withdrawals(),
                view,
                result,
                "Withdrawal rejected successfully",
                "Failed to reject withdrawal",
            )
            .await?
        }
        Command::BanUser { id, reason, days } => {
            let users = services.user_interactor();
            let result = users.ban(id, &reason, days).await;
            report(
                users.users(),
                view,
                result,
                "User banned successfully",
                "Failed to ban user",
            )
            .await?
        }
        Command::UnbanUser { id } => {
            let users = services.user_interactor();
            let result = users.unban(id).await;
            report(
                users.users(),
                view,
                result,
                "User unbanned successfully",
                "Failed to unban user",
            )
            .await?
        }
        Command::DeleteAllMessages => {
            let community = services.community_interactor();
            let result = community.delete_all().await;
            report(
                community.messages(),
                view,
                result,
                "All messages deleted successfully",
                "Failed to delete all messages",
            )
            .await?
        }
        Command::UpdateTicket { id, status } => {
            let support = services.support_interactor();
            let result = support.update_status(id, status).await;
            report(
                support.tickets(),
                view,
                result,
                "Ticket status updated successfully",
                "Failed to update ticket status",
            )
            .await?
        }
        Command::ActivatePromoCode { id } => {
            let catalog = services.catalog_interactor();
            let result = catalog.set_promo_code_active(id, true).await;
            report(
                catalog.promo_codes(),
                view,
                result,
                "Promo code activated",
                "Failed to update promo code status",
            )
            .await?
        }
        Command::DeactivatePromoCode { id } => {
            let catalog = services.catalog_interactor();
            let result = catalog.set_promo_code_active(id, false).await;
            report(
                catalog.promo_codes(),
                view,
                result,
                "Promo code deactivated",
                "Failed to update promo code status",
            )
            .await?
        }
        Command::DeletePromoCode { id } => {
            let catalog = services.catalog_interactor();
            let result = catalog.delete_promo_code(id).await;
            report(
                catalog.promo_codes(),
                view,
                result,
                "Promo code deleted",
                "Failed to delete promo code",
            )
            .await?
        }
        Command::TogglePlan { id } => {
            let catalog = services.catalog_interactor();
            let result = catalog.toggle_plan(id).await;
            report(
                catalog.plans(),
                view,
                result,
                "Plan status updated successfully",
                "Failed to update plan status",
            )
            .await?
        }
        Command::DeletePlan { id } => {
            let catalog = services.catalog_interactor();
            let result = catalog.delete_plan(id).await;
            report(
                catalog.plans(),
                view,
                result,
                "Plan deleted successfully",
                "Failed to delete plan",
            )
            .await?
        }
        Command::Broadcast(draft) => {
            let result = services
                .announcement_interactor()
                .broadcast(&draft.draft())
                .await;
            announce(view, result, "Notification sent to all users").await?
        }
        Command::NotifyUser { user_id, draft } => {
            let result = services
                .announcement_interactor()
                .notify_user(user_id, &draft.draft())
                .await;
            announce(view, result, "Notification sent").await?
        }
        Command::MarkNotificationRead { id } => {
            let presenter =
                NotificationPresenterImpl::new(services.notification_interactor(), view);
            presenter.show_notifications().await?;
            presenter.mark_as_read(id).await?
        }
        Command::MarkAllNotificationsRead => {
            let presenter =
                NotificationPresenterImpl::new(services.notification_interactor(), view);
            presenter.show_notifications().await?;
            presenter.mark_all_as_read().await?
        }
        Command::WatchNotifications { ticks } => {
            let interactor = services.notification_interactor();
            let presenter = NotificationPresenterImpl::new(interactor.clone(), view);
            let mut poller = services.notification_poller(interactor);
            let mut summaries = poller.subscribe();
            let mut session_rx = session.subscribe();
            poller.start()?;

            let mut remaining = ticks;
            loop {
                tokio::select! {
                    changed = summaries.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let summary = summaries.borrow_and_update().clone();
                        presenter.present(summary).await?;
                        if let Some(left) = remaining.as_mut() {
                            *left = left.saturating_sub(1);
                            if *left == 0 {
                                break;
                            }
                        }
                    }
                    _ = session_rx.changed() => {
                        if matches!(*session_rx.borrow(), SessionStatus::Ended(_)) {
                            break;
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        info!("Interrupted");
                        break;
                    }
                }
            }

            poller.stop().await;
        }
    }

    if let SessionStatus::Ended(reason) = session.status() {
        bail!("{}", reason);
    }

    Ok(())
}
