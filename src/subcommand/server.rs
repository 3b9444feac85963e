use {
  self::{api_key::ApiKey, error::ServerResult},
  super::*,
  crate::registry::Entry,
  axum::{
    extract::{Extension, Json, Path},
    http::{header, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Router,
  },
  axum_server::Handle,
  tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    validate_request::ValidateRequestHeaderLayer,
  },
};

mod api_key;
mod error;

#[derive(Debug, Parser, Clone)]
pub struct Server {
  #[arg(
    long,
    help = "Listen on <ADDRESS> for incoming requests. [default: 0.0.0.0]"
  )]
  pub(crate) address: Option<String>,
  #[arg(
    long,
    help = "Listen on <HTTP_PORT> for incoming HTTP requests. [default: 80]"
  )]
  pub(crate) http_port: Option<u16>,
}

impl Server {
  pub fn run(
    self,
    settings: Settings,
    registry: Arc<Registry>,
    handle: Handle,
  ) -> SubcommandResult {
    let api_key = ApiKey::new(settings.api_key().context("no API key specified")?);

    log::info!("Serving registry `{}`", registry.path().display());

    Runtime::new()?.block_on(async {
      let router = Self::router(registry, api_key);

      self.spawn(&settings, router, handle)?.await??;

      Ok(None)
    })
  }

  fn router(registry: Arc<Registry>, api_key: ApiKey) -> Router {
    Router::new()
      .route("/check/:list/:address", get(Self::check))
      .route("/exportfreemint", get(Self::export_freemint))
      .route("/exportwhitelist", get(Self::export_whitelist))
      .route("/freemint", get(Self::freemint).post(Self::add_freemint))
      .route("/freemint/check/:discord_id", get(Self::freemint_check))
      .route("/replacefreemint", post(Self::replace_freemint))
      .route("/replacewhitelist", post(Self::replace_whitelist))
      .route("/whitelist", get(Self::whitelist).post(Self::add_whitelist))
      .route_layer(ValidateRequestHeaderLayer::custom(api_key))
      .route("/status", get(Self::status))
      .layer(Extension(registry))
      .layer(SetResponseHeaderLayer::if_not_present(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'self'"),
      ))
      .layer(
        CorsLayer::new()
          .allow_methods([http::Method::GET, http::Method::POST])
          .allow_headers(Any)
          .allow_origin(Any),
      )
      .layer(CompressionLayer::new())
  }

  fn spawn(
    &self,
    settings: &Settings,
    router: Router,
    handle: Handle,
  ) -> Result<task::JoinHandle<io::Result<()>>> {
    let address = match &self.address {
      Some(address) => address.as_str(),
      None => {
        if cfg!(test) || settings.integration_test() {
          "127.0.0.1"
        } else {
          "0.0.0.0"
        }
      }
    };

    let addr = (address, self.http_port())
      .to_socket_addrs()?
      .next()
      .ok_or_else(|| anyhow!("failed to get socket addrs"))?;

    if !settings.integration_test() && !cfg!(test) {
      eprintln!("Listening on http://{addr}");
    }

    log::info!("Listening on {addr}");

    Ok(tokio::spawn(async move {
      axum_server::Server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    }))
  }

  fn http_port(&self) -> u16 {
    self.http_port.unwrap_or(80)
  }

  async fn status(
    Extension(registry): Extension<Arc<Registry>>,
  ) -> ServerResult<Json<api::Status>> {
    task::block_in_place(|| Ok(Json(registry.status()?)))
  }

  async fn whitelist(
    Extension(registry): Extension<Arc<Registry>>,
  ) -> ServerResult<Json<Vec<Entry>>> {
    Self::entries(&registry, ListKind::Whitelist)
  }

  async fn freemint(
    Extension(registry): Extension<Arc<Registry>>,
  ) -> ServerResult<Json<Vec<Entry>>> {
    Self::entries(&registry, ListKind::Freemint)
  }

  fn entries(registry: &Registry, kind: ListKind) -> ServerResult<Json<Vec<Entry>>> {
    task::block_in_place(|| Ok(Json(registry.entries(Some(kind))?)))
  }

  async fn add_whitelist(
    Extension(registry): Extension<Arc<Registry>>,
    Json(request): Json<api::AddEntry>,
  ) -> ServerResult<Json<api::Success>> {
    Self::add(&registry, ListKind::Whitelist, request)
  }

  async fn add_freemint(
    Extension(registry): Extension<Arc<Registry>>,
    Json(request): Json<api::AddEntry>,
  ) -> ServerResult<Json<api::Success>> {
    Self::add(&registry, ListKind::Freemint, request)
  }

  fn add(
    registry: &Registry,
    kind: ListKind,
    request: api::AddEntry,
  ) -> ServerResult<Json<api::Success>> {
    task::block_in_place(|| {
      registry.add_entry(
        Capability::trusted(Scope::List(kind)),
        &request.discord_id,
        &request.wallet_address,
        kind,
      )?;

      Ok(Json(api::Success { success: true }))
    })
  }

  async fn replace_whitelist(
    Extension(registry): Extension<Arc<Registry>>,
    Json(request): Json<api::ReplaceEntry>,
  ) -> ServerResult<Json<api::Success>> {
    Self::replace(&registry, ListKind::Whitelist, request)
  }

  async fn replace_freemint(
    Extension(registry): Extension<Arc<Registry>>,
    Json(request): Json<api::ReplaceEntry>,
  ) -> ServerResult<Json<api::Success>> {
    Self::replace(&registry, ListKind::Freemint, request)
  }

  fn replace(
    registry: &Registry,
    kind: ListKind,
    request: api::ReplaceEntry,
  ) -> ServerResult<Json<api::Success>> {
    task::block_in_place(|| {
      registry.replace_entry(
        Capability::trusted(Scope::List(kind)),
        &request.discord_id,
        &request.old_wallet,
        &request.new_wallet,
        kind,
      )?;

      Ok(Json(api::Success { success: true }))
    })
  }

  async fn export_whitelist(Extension(registry): Extension<Arc<Registry>>) -> ServerResult {
    Self::export(&registry, ListKind::Whitelist)
  }

  async fn export_freemint(Extension(registry): Extension<Arc<Registry>>) -> ServerResult {
    Self::export(&registry, ListKind::Freemint)
  }

  fn export(registry: &Registry, kind: ListKind) -> ServerResult {
    task::block_in_place(|| {
      let csv = registry.export(Capability::trusted(Scope::Admin), Some(kind))?;

      Ok(
        (
          [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
              header::CONTENT_DISPOSITION,
              format!("attachment; filename=\"{}\"", Csv::filename(Some(kind))),
            ),
          ],
          csv.to_string(),
        )
          .into_response(),
      )
    })
  }

  async fn freemint_check(
    Extension(registry): Extension<Arc<Registry>>,
    Path(discord_id): Path<OwnerId>,
  ) -> ServerResult<Json<api::FreeMint>> {
    task::block_in_place(|| {
      Ok(Json(api::FreeMint {
        has_free_mint: registry.has_entries(&discord_id, ListKind::Freemint)?,
      }))
    })
  }

  async fn check(
    Extension(registry): Extension<Arc<Registry>>,
    Path((list, address)): Path<(ListKind, String)>,
  ) -> ServerResult<Json<api::Check>> {
    task::block_in_place(|| {
      Ok(Json(api::Check {
        listed: registry.check_entry(&address, list)?,
      }))
    })
  }
}
