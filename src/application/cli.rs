use crate::application::{BookingApp, Config, TextRenderer};
use crate::domain::PaymentDetails;
use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "villa")]
#[command(about = "Book a stay at Villa Sekipan from the terminal")]
#[command(version)]
pub struct Cli {
    /// Session whose booking draft to work on (defaults to $VILLA_SESSION)
    #[arg(short, long, global = true)]
    pub session: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick dates on the interactive month calendar
    Calendar {
        /// Month to open on (YYYY-MM-DD format, defaults to the selection or today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Click days on the calendar without the interactive view
    Toggle {
        /// Days to toggle, in order (YYYY-MM-DD)
        #[arg(required = true)]
        dates: Vec<NaiveDate>,
    },
    /// Apply or remove a promo code
    Promo {
        #[command(subcommand)]
        action: PromoAction,
    },
    /// Fill in and submit the guest form
    Guest(GuestArgs),
    /// Show the booking summary
    Review,
    /// Print a WhatsApp link asking about the selected dates
    Whatsapp,
    /// Submit the booking with a transfer receipt
    Pay {
        /// Transfer receipt (image or PDF)
        #[arg(long)]
        proof: Option<PathBuf>,
        /// Day the transfer was made (YYYY-MM-DD)
        #[arg(long)]
        transfer_date: Option<NaiveDate>,
    },
    /// Discard the current booking draft
    Reset,
    /// Back-office views for the villa owner
    Owner {
        #[command(subcommand)]
        view: OwnerView,
    },
}

#[derive(Subcommand)]
pub enum PromoAction {
    Apply { code: String },
    Remove,
}

#[derive(clap::Args)]
pub struct GuestArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub province: Option<String>,
    #[arg(long)]
    pub guests: Option<u32>,
    #[arg(long)]
    pub extra_bed: Option<u32>,
    /// Expected arrival, e.g. 14:00
    #[arg(long)]
    pub check_in_time: Option<String>,
    #[arg(long)]
    pub requests: Option<String>,
}

#[derive(Subcommand)]
pub enum OwnerView {
    Dashboard,
    Bookings,
    /// Booked and blocked days of a month
    Calendar {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Nightly rates of a month
    Pricing {
        #[arg(short, long)]
        month: Option<String>,
    },
    Promos,
    Users,
}

fn parse_month(raw: Option<&str>, today: NaiveDate) -> Result<(i32, u32)> {
    let Some(raw) = raw else {
        return Ok((today.year(), today.month()));
    };

    let first = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM, got {raw:?}"))?;
    Ok((first.year(), first.month()))
}

impl Cli {
    pub fn run() -> Result<()> {
        let cli = Self::parse();

        let mut config = Config::from_env();
        if let Some(session) = cli.session {
            config = config.with_session(session);
        }
        let mut app = BookingApp::new(config)?;
        let renderer = TextRenderer::new(app.theme());

        // Default: open the calendar
        let command = cli.command.unwrap_or(Commands::Calendar { date: None });

        match command {
            Commands::Calendar { date } => {
                app.run_calendar(date)?;
                print!("{}", renderer.render_draft(app.store().draft(), app.flow().base_price())?);
            }
            Commands::Toggle { dates } => {
                let today = app.today();
                let (flow, store) = app.parts_mut();
                for date in dates {
                    let status = flow.availability().classify(date, today);
                    if !status.is_selectable() {
                        eprintln!("{date} is {}, skipped", status.label());
                    }
                    flow.toggle_date(store, date, today)?;
                }
                print!("{}", renderer.render_draft(app.store().draft(), app.flow().base_price())?);
            }
            Commands::Promo { action } => {
                let (flow, store) = app.parts_mut();
                match action {
                    PromoAction::Apply { code } => {
                        if let Err(e) = flow.apply_promo(store, &code) {
                            eprintln!("{e}");
                        }
                    }
                    PromoAction::Remove => flow.remove_promo(store)?,
                }
                print!("{}", renderer.render_draft(app.store().draft(), app.flow().base_price())?);
            }
            Commands::Guest(args) => {
                let (flow, store) = app.parts_mut();
                flow.update_form(store, |form| {
                    let text_fields = [
                        (&mut form.full_name, args.name),
                        (&mut form.phone, args.phone),
                        (&mut form.email, args.email),
                        (&mut form.address, args.address),
                        (&mut form.city, args.city),
                        (&mut form.province, args.province),
                        (&mut form.check_in_time, args.check_in_time),
                        (&mut form.special_requests, args.requests),
                    ];
                    for (field, value) in text_fields {
                        if let Some(value) = value {
                            *field = value;
                        }
                    }
                    if let Some(guests) = args.guests {
                        form.number_of_guests = guests;
                    }
                    if let Some(beds) = args.extra_bed {
                        form.extra_bed = beds;
                    }
                })?;
                flow.submit_guest_form(store)?;
                println!("Guest details saved, run `villa review` to check the booking");
            }
            Commands::Review => {
                let summary = app.flow().review(app.store())?;
                print!("{}", renderer.render_review(&summary, &app.config().bank)?);
            }
            Commands::Whatsapp => {
                let link = app
                    .flow()
                    .booking_request_link(app.store(), &app.config().admin_whatsapp)?;
                println!("{link}");
            }
            Commands::Pay {
                proof,
                transfer_date,
            } => {
                if let Some(path) = &proof {
                    if !path.is_file() {
                        bail!("payment proof not found: {}", path.display());
                    }
                }
                let payment = PaymentDetails {
                    proof_path: proof,
                    transfer_date,
                };

                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
                    .context("failed to start async runtime")?;
                let gateway = app.gateway();
                let (flow, store) = app.parts_mut();
                let confirmation =
                    runtime.block_on(flow.submit_payment(store, &gateway, payment))?;

                let order_link = app.config().order_link(&confirmation.reference);
                let link = confirmation.whatsapp_link(&app.config().admin_whatsapp, &order_link)?;
                print!("{}", renderer.render_confirmation(&confirmation)?);
                println!("Order:     {order_link}");
                println!("Confirm via WhatsApp: {link}");
            }
            Commands::Reset => {
                let (flow, store) = app.parts_mut();
                flow.reset(store)?;
                println!("Booking draft cleared");
            }
            Commands::Owner { view } => {
                let office = app.office();
                let today = app.today();
                let text = match view {
                    OwnerView::Dashboard => renderer.render_dashboard(&office.dashboard(today))?,
                    OwnerView::Bookings => renderer.render_bookings(office)?,
                    OwnerView::Calendar { month } => {
                        let (year, month) = parse_month(month.as_deref(), today)?;
                        renderer.render_availability_month(office, year, month)?
                    }
                    OwnerView::Pricing { month } => {
                        let (year, month) = parse_month(month.as_deref(), today)?;
                        renderer.render_rate_month(office, year, month)?
                    }
                    OwnerView::Promos => {
                        renderer.render_promos(office, app.flow().catalog(), today)?
                    }
                    OwnerView::Users => renderer.render_users(office)?,
                };
                print!("{text}");
            }
        }

        Ok(())
    }
}
