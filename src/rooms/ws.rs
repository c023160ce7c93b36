use std::{fmt::Display, sync::Arc};

use axum::{
    debug_handler,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    config::IdleTimeout,
    hub::{ConnectionId, Hub, Rx, Tx},
    protocol,
};

#[debug_handler(state = crate::AppState)]
pub async fn room_ws(
    State(hub): State<Arc<Hub>>,
    State(idle): State<IdleTimeout>,

    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |stream| serve(stream, hub, idle))
}

async fn serve(stream: WebSocket, hub: Arc<Hub>, idle: IdleTimeout) {
    let (tx, mut rx): (Tx, Rx) = mpsc::unbounded_channel();
    let id = hub.connect(tx).await;
    let (mut sender, receiver) = stream.split();

    let outbound_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    error!("failed to encode {event:?}: {e}");
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    pump(&hub, id, receiver, idle).await;
    outbound_task.abort();
}

/// Feed inbound frames to the hub until the socket closes, errors or goes
/// quiet for longer than `idle`, then disconnect `id`.
async fn pump<S, E>(hub: &Hub, id: ConnectionId, mut receiver: S, idle: IdleTimeout)
where
    S: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    loop {
        let next = match idle.0 {
            Some(limit) => match tokio::time::timeout(limit, receiver.next()).await {
                Ok(next) => next,
                Err(_) => {
                    info!(%id, "no traffic for {limit:?}, dropping connection");
                    break;
                }
            },
            None => receiver.next().await,
        };

        let msg = match next {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                debug!(%id, "websocket error: {e}");
                break;
            }
            None => break,
        };

        match msg {
            Message::Close(_) => break,
            Message::Text(_) | Message::Binary(_) => match protocol::decode(&msg.into_data()) {
                Ok(event) => hub.dispatch(id, event).await,
                Err(e) => debug!(%id, "dropping event: {e}"),
            },
            // pings are answered by axum
            _ => {}
        }
    }

    hub.disconnect(id).await;
}
