//! Websocket Endpoint
//!
//! One socket per client at `GET /ws`, multiplexing every channel the
//! client cares about. Inbound frames are `ClientEvent` JSON; outbound
//! delivery runs through an unbounded per-connection queue drained by a
//! writer task, so a slow reader never blocks a broadcast.
//!
//! A closed or failed socket drops out of all channels silently. Only an
//! explicit `leave_room` announces a departure to the remaining members.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedSender};
use uuid::Uuid;

use crate::messages;
use crate::model::{ClientEvent, ServerEvent};
use crate::realtime::broker::ChannelId;
use crate::server::state::AppState;

/// Upgrade handler for `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one connection: a writer task plus the read loop
async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();
    let (sender, mut outbound) = mpsc::unbounded_channel::<ServerEvent>();

    // Only the writer task touches the sink; everything else enqueues.
    let writer = tokio::spawn(async move {
        while let Some(event) = outbound.recv().await {
            let Ok(text) = serde_json::to_string(&event) else {
                continue;
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    tracing::debug!(connection = %connection_id, "socket connected");

    while let Some(Ok(frame)) = stream.next().await {
        let Message::Text(text) = frame else {
            continue;
        };

        let event = match serde_json::from_str::<ClientEvent>(text.as_str()) {
            Ok(event) => event,
            Err(err) => {
                // Unknown or malformed events are skipped, not fatal.
                tracing::debug!(connection = %connection_id, %err, "skipping unparseable frame");
                continue;
            }
        };

        dispatch(&state, connection_id, &sender, event).await;
    }

    state.broker.drop_connection(connection_id);
    writer.abort();

    tracing::debug!(connection = %connection_id, "socket disconnected");
}

/// Apply one client event against the broker and the store
async fn dispatch(
    state: &AppState,
    connection_id: Uuid,
    sender: &UnboundedSender<ServerEvent>,
    event: ClientEvent,
) {
    match event {
        ClientEvent::JoinRoom { room_id } => {
            let channel = ChannelId::Room(room_id.clone());
            state
                .broker
                .join(channel.clone(), connection_id, sender.clone());
            tracing::debug!(connection = %connection_id, channel = %channel, "joined");

            state.broker.broadcast_except(
                &channel,
                connection_id,
                ServerEvent::UserJoined {
                    room_id,
                    connection_id: connection_id.to_string(),
                },
            );
        }

        ClientEvent::LeaveRoom { room_id } => {
            let channel = ChannelId::Room(room_id.clone());
            state.broker.leave(&channel, connection_id);
            tracing::debug!(connection = %connection_id, channel = %channel, "left");

            // The leaver is already unsubscribed, so this reaches only
            // the remaining members.
            state.broker.broadcast(
                &channel,
                ServerEvent::UserLeft {
                    room_id,
                    connection_id: connection_id.to_string(),
                },
            );
        }

        ClientEvent::SendMessage {
            room_id,
            author,
            content,
            message_type,
        } => {
            match messages::db::append_message(&state.pool, &room_id, &author, &content, message_type)
                .await
            {
                Ok(view) => {
                    // Single authoritative echo: the sender receives the
                    // stored message the same way everyone else does.
                    state
                        .broker
                        .broadcast(&ChannelId::Room(room_id), ServerEvent::ReceiveMessage(view));
                }
                Err(err) => {
                    tracing::error!(connection = %connection_id, %err, "message append failed");
                    let _ = sender.send(ServerEvent::Error {
                        message: "Failed to send message".to_string(),
                    });
                }
            }
        }

        ClientEvent::JoinBlogPost { post_id } => {
            state
                .broker
                .join(ChannelId::BlogPost(post_id), connection_id, sender.clone());
        }

        ClientEvent::LeaveBlogPost { post_id } => {
            state
                .broker
                .leave(&ChannelId::BlogPost(post_id), connection_id);
        }

        ClientEvent::NewComment { post_id, comment } => {
            state
                .broker
                .broadcast(&ChannelId::BlogPost(post_id), ServerEvent::CommentAdded(comment));
        }

        ClientEvent::VoteUpdate {
            post_id,
            upvotes,
            downvotes,
            vote_type,
        } => {
            state.broker.broadcast(
                &ChannelId::BlogPost(post_id.clone()),
                ServerEvent::VoteChanged {
                    post_id,
                    upvotes,
                    downvotes,
                    vote_type,
                },
            );
        }

        ClientEvent::SubscribeNotifications { user_id } => {
            state.broker.join(
                ChannelId::Notifications(user_id),
                connection_id,
                sender.clone(),
            );
        }

        ClientEvent::UnsubscribeNotifications { user_id } => {
            state
                .broker
                .leave(&ChannelId::Notifications(user_id), connection_id);
        }
    }
}
