//! Seed script for local development.
//!
//! Populates the document store with a couple of retreats and blog posts so
//! the public pages and the admin panel have something to show.
//! Run: cargo run --bin seed_data

use chrono::Utc;

use everbloom::models::{BlogInput, RetreatInput, SectionInput};
use everbloom::storage::Store;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let path = std::env::var("STORE_PATH").unwrap_or_else(|_| "everbloom_data".to_string());
    let store = Store::open(&path)?;

    let retreats = [
        RetreatInput {
            label: Some("SPRING".to_string()),
            title: Some("Returning to the body".to_string()),
            price: Some(480.0),
            description: Some(
                "Three days in the hills: breathwork, long silent walks and \
                 shared meals. For anyone wanting to slow down and listen."
                    .to_string(),
            ),
            ..Default::default()
        },
        RetreatInput {
            label: Some("AUTUMN".to_string()),
            title: Some("Letting the leaves fall".to_string()),
            price: Some(520.0),
            description: Some(
                "A weekend on releasing old patterns before winter. Somatic \
                 practice in the mornings, open inquiry circles at night."
                    .to_string(),
            ),
            bg_color: Some("bg-amber-50".to_string()),
            ..Default::default()
        },
    ];
    for input in retreats {
        input.validate_new()?;
        let retreat = input.into_retreat(Utc::now());
        store.put_retreat(&retreat)?;
        println!("seeded retreat {} ({})", retreat.label, retreat.id);
    }

    let blogs = [
        BlogInput {
            title: Some("On beginning again".to_string()),
            subtitle: Some("Every morning is a small threshold".to_string()),
            description: Some(
                "Why starting over is not failure but the shape of practice itself.".to_string(),
            ),
            sections: Some(vec![
                SectionInput {
                    heading: Some("The myth of arrival".to_string()),
                    content: Some(
                        "We imagine healing as a destination. It behaves more \
                         like weather: it moves through, and we learn to dress for it."
                            .to_string(),
                    ),
                },
                SectionInput {
                    heading: Some("A practice".to_string()),
                    content: Some(
                        "Tomorrow morning, before reaching for anything, take \
                         three breaths and name what is actually here."
                            .to_string(),
                    ),
                },
            ]),
            is_published: Some(true),
            ..Default::default()
        },
        BlogInput {
            title: Some("What the body keeps".to_string()),
            subtitle: Some("Notes from the spring retreat".to_string()),
            description: Some(
                "A draft of reflections from three days of silence. Unpublished until edited."
                    .to_string(),
            ),
            ..Default::default()
        },
    ];
    for input in blogs {
        input.validate_new()?;
        let blog = input.into_blog(Utc::now())?;
        store.put_blog(&blog)?;
        println!(
            "seeded blog {} ({}, {})",
            blog.title,
            blog.id,
            if blog.is_published { "published" } else { "draft" }
        );
    }

    println!("done; store at {path}");
    Ok(())
}
