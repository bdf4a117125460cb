use super::optimistic::Overlay;
use crate::models::{Comment, Post};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostsState {
    pub posts: Overlay<Post>,
    /// Snapshot recorded when a post is opened from the list
    pub selected_post: Option<Post>,
    pub comments: Overlay<Comment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostsAction {
    PostPending(Post),
    PostConfirmed { local_id: String, post: Post },
    PostFailed { local_id: String, reason: String },
    /// Server list loaded; ids of the posts it contains
    PostsLoaded(Vec<String>),
    PostRemoved(String),
    SelectPost(Post),

    CommentPending(Comment),
    CommentConfirmed { local_id: String, comment: Comment },
    CommentFailed { local_id: String, reason: String },
    CommentsLoaded(Vec<String>),
    CommentRemoved(String),

    DismissFailed,
    /// Forget everything; used on logout
    Reset,
}

pub fn reduce(mut state: PostsState, action: &PostsAction) -> PostsState {
    match action {
        PostsAction::PostPending(post) => state.posts.push_pending(post.clone()),
        PostsAction::PostConfirmed { local_id, post } => {
            state.posts.confirm(local_id, post.clone());
        }
        PostsAction::PostFailed { local_id, reason } => {
            state.posts.fail(local_id, reason.clone());
        }
        PostsAction::PostsLoaded(ids) => {
            state.posts.supersede(ids.iter().map(String::as_str));
        }
        PostsAction::PostRemoved(id) => {
            state.posts.remove(id);
            if state.selected_post.as_ref().is_some_and(|p| &p.id == id) {
                state.selected_post = None;
            }
        }
        PostsAction::SelectPost(post) => state.selected_post = Some(post.clone()),

        PostsAction::CommentPending(comment) => state.comments.push_pending(comment.clone()),
        PostsAction::CommentConfirmed { local_id, comment } => {
            state.comments.confirm(local_id, comment.clone());
        }
        PostsAction::CommentFailed { local_id, reason } => {
            state.comments.fail(local_id, reason.clone());
        }
        PostsAction::CommentsLoaded(ids) => {
            state.comments.supersede(ids.iter().map(String::as_str));
        }
        PostsAction::CommentRemoved(id) => {
            state.comments.remove(id);
        }

        PostsAction::DismissFailed => {
            state.posts.dismiss_failed();
            state.comments.dismiss_failed();
        }

        PostsAction::Reset => return PostsState::default(),
    }
    state
}
