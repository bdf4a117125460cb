use blogpad_client::models::User;
use blogpad_client::notify::{Toast, ToastLevel};
use blogpad_client::pages::{
    format_date, CommentRow, PostDetailView, PostListView, PostSource, RowStatus,
};
use blogpad_client::validation::ValidationErrors;
use colored::Colorize;

pub fn toasts(toasts: &[Toast]) {
    for toast in toasts {
        match toast.level {
            ToastLevel::Success => println!("✅ {}", toast.message.green()),
            ToastLevel::Error => println!("❌ {}", toast.message.red()),
            ToastLevel::Loading => println!("⏳ {}", toast.message.dimmed()),
        }
    }
}

pub fn validation(errors: &ValidationErrors) {
    for error in errors.iter() {
        println!("   {} {}", format!("{}:", error.field).yellow(), error.message);
    }
}

pub fn user(user: &User) {
    println!("👤 {} {} ({})", user.first_name, user.last_name, user.user_name.bold());
    println!("   Email: {}", user.email);
}

fn status_tag(status: &RowStatus) -> String {
    match status {
        RowStatus::Server => String::new(),
        RowStatus::Pending => format!(" {}", "(sending)".yellow()),
        RowStatus::Confirmed => format!(" {}", "(saved)".green()),
        RowStatus::Failed(reason) => format!(" {}", format!("(failed: {})", reason).red()),
    }
}

pub fn post_list(view: &PostListView) {
    if view.is_empty() {
        println!("   No posts yet");
        println!("   Tip: create the first one with `blogpad create`");
        return;
    }

    println!("📋 {} posts", view.total_items);
    println!();
    for row in &view.rows {
        let post = &row.post;
        let owner = if row.can_delete { " ✎".cyan().to_string() } else { String::new() };
        println!(
            "   [{}] {}{}{}",
            post.id.dimmed(),
            post.title.bold(),
            owner,
            status_tag(&row.status)
        );
        println!(
            "      by {} · {} · {} comments",
            post.user_name,
            format_date(&post.created_at),
            post.comment_count
        );
        println!("      {}", truncate(&post.content, 60));
        println!();
    }

    if let Some(pagination) = view.pagination {
        if pagination.total > 1 {
            println!("   {}", pagination);
        }
    }
}

pub fn post_detail(view: &PostDetailView) {
    let Some(source) = &view.post else {
        println!("🔍 Post not found");
        println!("   Tip: use `blogpad list` to see available posts");
        return;
    };

    let post = source.post();
    if matches!(source, PostSource::Snapshot(_)) {
        println!("{}", "(showing the copy from the list, server unavailable)".yellow());
    }
    println!("📄 {}", post.title.bold());
    let edited = if post.is_edited { " · edited" } else { "" };
    println!(
        "   by {} · {}{}",
        post.user_name,
        format_date(&post.created_at),
        edited
    );
    if view.can_edit {
        println!("   {}", "you can edit or delete this post".cyan());
    }
    println!();
    for line in post.content.lines() {
        println!("   {}", line);
    }
    println!();

    println!("💬 Comments");
    if view.comments.is_empty() {
        println!("   No comments yet");
    }
    for row in &view.comments {
        comment(row);
    }
    if let Some(pagination) = view.pagination {
        if pagination.total > 1 {
            println!("   {}", pagination);
        }
    }
}

fn comment(row: &CommentRow) {
    let c = &row.comment;
    let id = if row.can_delete {
        format!(" [{}]", c.id).dimmed().to_string()
    } else {
        String::new()
    };
    println!(
        "   {} · {}{}{}",
        c.user_name.bold(),
        format_date(&c.created_at),
        id,
        status_tag(&row.status)
    );
    println!("      {}", c.content);
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
