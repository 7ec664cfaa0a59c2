use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use chowkashi_application::prelude::*;
use chowkashi_core::{
    entities::*,
    local_state::{KeyValueStore, LocalState},
    repositories::{ListingRepo, ReviewRepo},
    usecases::{self, LocationInput, SearchResults},
};
use chowkashi_gateways::notice::LogNotices;

use crate::{config::Config, gateways};

#[derive(Debug, Parser)]
#[command(name = "chowkashi", version, about = "Search the Chowkashi business directory")]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Position of this device as `lat,lng`, used for "near me"
    #[arg(long, global = true)]
    pub position: Option<MapPoint>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search listings
    Search(SearchArgs),
    /// List listings with a postal code, all listings if empty
    Postal {
        #[arg(default_value = "")]
        code: String,
    },
    /// Resolve a place name or "near me" to coordinates
    Locate { input: String },
    /// List categories, optionally adding a custom one
    Categories {
        #[arg(long)]
        add: Option<String>,
    },
    /// Show the review summary and the local notes of a listing
    Reviews {
        listing_id: String,
        /// Store a note for the listing on this device
        #[arg(long)]
        note: Option<String>,
        /// Keep a rating from 1 to 5 on this device
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rate: Option<u8>,
        /// Comment for the rating
        #[arg(long, requires = "rate")]
        comment: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(default_value = "")]
    pub text: String,

    /// Place name or "near me"
    #[arg(short, long)]
    pub location: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Maximum distance in km
    #[arg(long)]
    pub radius: Option<f64>,

    #[arg(long)]
    pub min_rating: Option<f64>,

    /// 1 (budget) to 3 (premium)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub price_tier: Option<u8>,

    #[arg(long)]
    pub open_now: bool,

    /// rating, distance, reviewCount or newest
    #[arg(long)]
    pub sort: Option<String>,

    /// Let the backend rewrite the query first
    #[arg(long)]
    pub enhance: bool,
}

impl SearchArgs {
    fn apply_to(&self, filters: &mut FilterSet) {
        if let Some(radius) = self.radius {
            filters.radius_km = radius;
        }
        if let Some(min_rating) = self.min_rating {
            filters.min_rating = min_rating;
        }
        filters.price_tier = self.price_tier.and_then(PriceTier::from_level);
        filters.open_now = self.open_now;
        filters.category = self.category.clone();
        filters.sort = self.sort.as_deref().and_then(SortKey::parse_lossy);
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::try_load_from_file_or_default(cli.config.as_ref())?;
    let gateways::Gateways {
        backend,
        geocoder,
        device,
    } = gateways::Gateways::try_new(&cfg, cli.position)?;

    match cli.command {
        Command::Search(args) => {
            let session = SearchSession::new(backend, geocoder, device, LogNotices)
                .with_cache(gateways::location_cache(&cfg.cache)?);
            if let Some(location) = &args.location {
                session
                    .resolve_location(&LocationInput::from_text(location))
                    .await;
            }
            session.update_filters(|filters| args.apply_to(filters));
            if let Outcome::Applied(results) = session.search(&args.text, args.enhance).await? {
                print_results(&results);
            }
        }
        Command::Postal { code } => {
            let session = SearchSession::new(backend, geocoder, device, LogNotices);
            if let Outcome::Applied(results) = session.search_postal_code(&code).await? {
                print_results(&results);
            }
        }
        Command::Locate { input } => {
            let session = SearchSession::new(backend, geocoder, device, LogNotices);
            if let Some(location) = session
                .resolve_location(&LocationInput::from_text(&input))
                .await
                .applied()
                .flatten()
            {
                let (lat, lng) = location.pos.to_lat_lng_deg();
                println!("{}: {lat:.6}, {lng:.6}", location.label);
            }
        }
        Command::Categories { add } => {
            let local = gateways::local_state(&cfg.local_state)?;
            if let Some(name) = add {
                usecases::add_custom_category(&local, &name)?;
            }
            for category in usecases::load_categories(&backend, &local).await {
                let marker = if category.is_custom() { " (custom)" } else { "" };
                println!("{}{marker}", category.name);
            }
        }
        Command::Reviews {
            listing_id,
            note,
            rate,
            comment,
        } => {
            let local = gateways::local_state(&cfg.local_state)?;
            if let Some(note) = note {
                local.add_note(&listing_id, note)?;
            }
            if let Some(rating) = rate {
                usecases::cache_local_review(
                    &local,
                    &listing_id,
                    rating,
                    comment.as_deref(),
                    Timestamp::now(),
                )?;
            }
            print_reviews(&backend, &local, &listing_id).await;
        }
    }
    Ok(())
}

fn print_results(results: &SearchResults) {
    if results.listings.is_empty() {
        println!("No listings found for '{}'", results.query);
        return;
    }
    for (i, item) in results.listings.iter().enumerate() {
        let listing = &item.listing;
        let rating = listing
            .rating
            .map(|r| format!("{r:.1}★"))
            .unwrap_or_else(|| "unrated".to_string());
        let category = listing.category.as_deref().unwrap_or("-");
        let distance = item.distance_label.as_deref().unwrap_or("");
        println!("{:>3}. {} [{category}] {rating} {distance}", i + 1, listing.name);
    }
}

async fn print_reviews<R, S>(repo: &R, local: &LocalState<S>, listing_id: &str)
where
    R: ListingRepo + ReviewRepo,
    S: KeyValueStore,
{
    let summary = match usecases::refresh_listing_rating(repo, listing_id).await {
        Ok((listing, summary)) => {
            println!("{}", listing.name);
            summary
        }
        Err(err) => {
            log::warn!("Failed to load listing {listing_id}: {err}");
            usecases::load_review_summary(repo, listing_id).await
        }
    };
    println!(
        "{:.1}★ from {} reviews",
        f64::from(summary.average),
        summary.count
    );
    for criterion in [
        ReviewCriterion::Quality,
        ReviewCriterion::Service,
        ReviewCriterion::Value,
        ReviewCriterion::Punctuality,
    ] {
        if let Some(avg) = summary.criteria.get(criterion) {
            println!("  {criterion}: {:.1}", f64::from(avg));
        }
    }
    let cached = local.cached_reviews(listing_id);
    if !cached.is_empty() {
        println!("{} reviews stored on this device", cached.len());
    }
    for note in local.notes(listing_id) {
        println!("- {note}");
    }
}
