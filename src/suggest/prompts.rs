//! Prompt assembly for the suggestion gateway.
//!
//! One fixed instruction per suggestion kind plus a metrics summary
//! built from the caller's channel and video numbers. Nothing here is
//! user-editable; the caller only picks the kind.

use std::fmt::Write;

use super::types::{ChannelSnapshot, ChatMessage, SuggestionKind, SuggestionRequest, VideoSnapshot};

/// Fixed instruction template for a suggestion kind.
pub fn instruction_for(kind: SuggestionKind) -> &'static str {
    match kind {
        SuggestionKind::Scripts => {
            "You are a YouTube content strategist. Based on the channel metrics provided, \
             suggest 3 video ideas with a short script outline for each: hook, main beats \
             and call to action. Match the channel's niche and what has performed well."
        }
        SuggestionKind::Shorts => {
            "You are a short-form video expert. Based on the channel metrics provided, \
             suggest 5 Shorts ideas with a one-line hook each, designed to pull new \
             viewers toward the channel's existing content."
        }
        SuggestionKind::Schedule => {
            "You are a YouTube growth consultant. Based on the channel metrics provided, \
             propose a realistic weekly posting schedule for the next month, with video \
             formats and reasoning for each slot."
        }
        SuggestionKind::Growth => {
            "You are a YouTube growth consultant. Based on the channel metrics provided, \
             give a prioritized list of concrete growth actions for the next 30 days, \
             each with the metric it should move."
        }
    }
}

/// Render the channel and video numbers into prompt text.
pub fn metrics_summary(channel: &ChannelSnapshot, videos: &[VideoSnapshot]) -> String {
    let mut summary = String::new();

    let _ = writeln!(summary, "Channel: {}", channel.name);
    if let Some(niche) = &channel.niche {
        let _ = writeln!(summary, "Niche: {}", niche);
    }
    let _ = writeln!(
        summary,
        "Subscribers: {} | Total views: {} | Videos: {}",
        channel.subscribers, channel.total_views, channel.video_count
    );

    if videos.is_empty() {
        let _ = writeln!(summary, "No recent video data available.");
    } else {
        let _ = writeln!(summary, "Recent videos:");
        for video in videos {
            let _ = write!(summary, "- {}: {} views", video.title, video.views);
            if let Some(likes) = video.likes {
                let _ = write!(summary, ", {} likes", likes);
            }
            if let Some(comments) = video.comments {
                let _ = write!(summary, ", {} comments", comments);
            }
            summary.push('\n');
        }
    }

    summary
}

/// Build the upstream message list for a request.
pub fn build_messages(request: &SuggestionRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(instruction_for(request.kind).to_string()),
        ChatMessage::user(metrics_summary(&request.channel, &request.videos)),
    ]
}
