use crate::app::{AppContext, Result};
use crate::domain::{FeedSnapshot, VideoItem};

pub async fn show_page(
    ctx: &AppContext,
    offset: u32,
    limit: u32,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    let category = category.unwrap_or(ctx.category());
    let page = ctx
        .gateway
        .fetch_recommendations(offset, limit, category)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.is_empty() {
        println!("No items at offset {}", offset);
        return Ok(());
    }

    for item in &page.items {
        println!("{}", format_item(item));
    }
    println!(
        "{} of {} items (offset {}, limit {})",
        page.items.len(),
        page.total_count,
        page.offset,
        page.limit
    );

    Ok(())
}

pub fn show_stream_url(ctx: &AppContext, video_id: i64) {
    println!("{}", ctx.gateway.stream_url(video_id));
}

/// Drive a controller the way a scrolling viewer would: one item further
/// each step, reporting the position against the latest snapshot.
pub async fn scroll(ctx: &AppContext, steps: usize) -> Result<()> {
    let feed = ctx.spawn_feed();
    feed.reset().await?;
    print_window(&feed.snapshot(), None);

    let mut current = feed.snapshot().items.first().map(|item| item.id);

    for step in 1..=steps {
        let Some(next) = next_visible(&feed.snapshot(), current) else {
            println!("End of feed");
            break;
        };

        feed.notify_visible(next.index).await?;
        current = Some(next.id);

        println!("-- step {} --", step);
        print_window(&feed.snapshot(), current);
    }

    feed.shutdown()?;
    Ok(())
}

struct Visible {
    index: usize,
    id: i64,
}

/// The item one below `current`, or `current` itself while the list is
/// waiting on more pages. `None` once the feed can't go further.
fn next_visible(snapshot: &FeedSnapshot, current: Option<i64>) -> Option<Visible> {
    let position = current.and_then(|id| snapshot.position_of(id)).unwrap_or(0);
    let candidate = if position + 1 < snapshot.len() {
        position + 1
    } else if snapshot.has_more {
        position
    } else {
        return None;
    };

    snapshot.items.get(candidate).map(|item| Visible {
        index: candidate,
        id: item.id,
    })
}

fn print_window(snapshot: &FeedSnapshot, current: Option<i64>) {
    for item in &snapshot.items {
        let marker = if Some(item.id) == current { ">" } else { " " };
        println!("{} {}", marker, format_item(item));
    }

    let mut status = format!(
        "[{} cached, next offset {}]",
        snapshot.len(),
        snapshot.next_offset
    );
    if !snapshot.has_more {
        status.push_str(" [end]");
    }
    if let Some(error) = &snapshot.last_error {
        status.push_str(&format!(" [error: {}]", error));
    }
    println!("{}", status);
}

fn format_item(item: &VideoItem) -> String {
    let date = item
        .published_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());
    let lock = if item.is_free || item.has_access { " " } else { "$" };

    format!(
        "{:>8} {} {:>7} views {:>7} {} {}",
        item.id,
        date,
        item.view_count,
        item.display_duration(),
        lock,
        item.display_title()
    )
}
