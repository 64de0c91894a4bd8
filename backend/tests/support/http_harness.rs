//! Real-listener harness for the candidate behaviour suites.
//!
//! Owns a current-thread Tokio runtime plus a `LocalSet` because Actix uses
//! `spawn_local` internally. Dropping the `WorldFixture` stops the server even
//! when a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use candidates::Trace;
use candidates::domain::CandidateService;
use candidates::inbound::http::state::HttpState;
use candidates::inbound::http::{api_scope, views_scope};
use candidates::outbound::memory::InMemoryCandidateRepository;

pub(crate) struct CandidatesWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) repository: Arc<InMemoryCandidateRepository>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_text: Option<String>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) last_location: Option<String>,
    pub(crate) session_cookie: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<CandidatesWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        // The LocalSet must be driven on its owning thread; the future must not
        // borrow the world.
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .build()
}

async fn spawn_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(api_scope())
            .service(views_scope().wrap(session_middleware(key.clone())))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let repository = Arc::new(InMemoryCandidateRepository::new());
    let service = CandidateService::new(repository.clone());
    let http_state = HttpState::from_service(Arc::new(service));

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(CandidatesWorld {
        runtime,
        local,
        base_url,
        server,
        repository,
        last_status: None,
        last_body: None,
        last_text: None,
        last_trace_id: None,
        last_location: None,
        session_cookie: None,
    }));

    WorldFixture { world }
}
