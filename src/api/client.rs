use crate::{
    api::models::{MapMetadata, MotorPath, RobotState, SensorCommand},
    core::{
        config::ServerConfig,
        geo::{PhysicalPoint, TileCoord},
    },
    ConsoleError, Result,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Shared async HTTP client. Building it once keeps one connection pool for
/// the poller, the motor loop and the tile loader.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("slamview/", env!("CARGO_PKG_VERSION")))
        .tcp_keepalive(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .expect("failed to build reqwest async client")
});

/// Everything the console asks of the robot-control server.
///
/// A non-2xx answer is returned as [`ConsoleError::Server`] carrying the
/// server's message.
#[async_trait]
pub trait RobotApi: Send + Sync {
    /// Pose and run state, polled by the sync loop
    async fn robot_state(&self) -> Result<RobotState>;

    async fn set_motor_speeds(&self, left: f64, right: f64) -> Result<()>;

    /// Ask the server to plan a path to `target`; may take several seconds
    async fn plan_path_to(&self, target: PhysicalPoint) -> Result<()>;

    /// Current planned path; `None` when there is none
    async fn motor_path(&self) -> Result<Option<MotorPath>>;

    async fn follow_path(&self) -> Result<()>;

    async fn stop_path_following(&self) -> Result<()>;

    async fn delete_path(&self) -> Result<()>;

    async fn slam_initialize(&self, algorithm: &str) -> Result<()>;

    async fn slam_initialize_from_stored(&self, filename: &str, algorithm: &str) -> Result<()>;

    async fn slam_start(&self) -> Result<()>;

    async fn slam_stop(&self) -> Result<()>;

    async fn slam_terminate(&self) -> Result<()>;

    async fn slam_save(&self, name: &str, description: &str) -> Result<()>;

    async fn map_metadata(&self, filename: &str) -> Result<MapMetadata>;

    async fn map_thumbnail(&self, filename: &str) -> Result<Vec<u8>>;

    async fn rename_map(&self, filename: &str, new_name: &str) -> Result<()>;

    async fn sensor(&self, command: SensorCommand, sensor: &str) -> Result<()>;

    /// Server log, oldest line first
    async fn log_lines(&self) -> Result<Vec<String>>;

    async fn rename_sensor_log(&self, log_name: &str, new_name: &str) -> Result<()>;

    async fn delete_sensor_log(&self, log_name: &str) -> Result<()>;

    async fn start_log_replay(&self, log_name: &str) -> Result<()>;

    async fn stop_log_replay(&self) -> Result<()>;

    /// PNG bytes of one map tile
    async fn tile(&self, coord: TileCoord) -> Result<Vec<u8>>;
}

/// [`RobotApi`] over HTTP. All calls are GETs with query parameters.
#[derive(Debug, Clone)]
pub struct HttpRobotApi {
    api_root: String,
    timeout: Duration,
}

impl HttpRobotApi {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            api_root: api_root(config),
            timeout: config.timeout(),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}{}", self.api_root, action)
    }

    async fn get(&self, action: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let url = self.endpoint(action);
        log::debug!("GET {} {:?}", url, query);

        let resp = HTTP_CLIENT
            .get(&url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ConsoleError::Server {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }
        Ok(resp)
    }

    async fn command(&self, action: &str, query: &[(&str, String)]) -> Result<()> {
        self.get(action, query).await?;
        Ok(())
    }

    async fn json<T: DeserializeOwned>(&self, action: &str, query: &[(&str, String)]) -> Result<T> {
        let bytes = self.get(action, query).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn bytes(&self, action: &str, query: &[(&str, String)]) -> Result<Vec<u8>> {
        Ok(self.get(action, query).await?.bytes().await?.to_vec())
    }
}

/// `base_url` joined with `api_prefix`, always ending in `/`.
pub(crate) fn api_root(config: &ServerConfig) -> String {
    let base = config.base_url.trim_end_matches('/');
    let prefix = config.api_prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}/", base, prefix)
    }
}

#[async_trait]
impl RobotApi for HttpRobotApi {
    async fn robot_state(&self) -> Result<RobotState> {
        self.json("get/slam/stats", &[]).await
    }

    async fn set_motor_speeds(&self, left: f64, right: f64) -> Result<()> {
        self.command(
            "set/motor/speeds",
            &[("left", left.to_string()), ("right", right.to_string())],
        )
        .await
    }

    async fn plan_path_to(&self, target: PhysicalPoint) -> Result<()> {
        self.command(
            "set/motor/planpath",
            &[("x", target.x.to_string()), ("y", target.y.to_string())],
        )
        .await
    }

    async fn motor_path(&self) -> Result<Option<MotorPath>> {
        self.json("get/motor/path", &[]).await
    }

    async fn follow_path(&self) -> Result<()> {
        self.command("set/motor/followpath", &[]).await
    }

    async fn stop_path_following(&self) -> Result<()> {
        self.command("set/motor/stoppathfollowing", &[]).await
    }

    async fn delete_path(&self) -> Result<()> {
        self.command("set/motor/deletepath", &[]).await
    }

    async fn slam_initialize(&self, algorithm: &str) -> Result<()> {
        self.command("set/slam/initialize", &[("algorithm", algorithm.to_string())])
            .await
    }

    async fn slam_initialize_from_stored(&self, filename: &str, algorithm: &str) -> Result<()> {
        self.command(
            "set/slam/initialize-from-stored-map",
            &[
                ("algorithm", algorithm.to_string()),
                ("filename", filename.to_string()),
            ],
        )
        .await
    }

    async fn slam_start(&self) -> Result<()> {
        self.command("set/slam/start", &[]).await
    }

    async fn slam_stop(&self) -> Result<()> {
        self.command("set/slam/stop", &[]).await
    }

    async fn slam_terminate(&self) -> Result<()> {
        self.command("set/slam/terminate", &[]).await
    }

    async fn slam_save(&self, name: &str, description: &str) -> Result<()> {
        self.command(
            "set/slam/save",
            &[
                ("name", name.to_string()),
                ("description", description.to_string()),
            ],
        )
        .await
    }

    async fn map_metadata(&self, filename: &str) -> Result<MapMetadata> {
        self.json("get/mapstorage/metadata", &[("filename", filename.to_string())])
            .await
    }

    async fn map_thumbnail(&self, filename: &str) -> Result<Vec<u8>> {
        self.bytes("get/mapstorage/thumbnail", &[("filename", filename.to_string())])
            .await
    }

    async fn rename_map(&self, filename: &str, new_name: &str) -> Result<()> {
        self.command(
            "set/mapstorage/mapname",
            &[
                ("filename", filename.to_string()),
                ("newname", new_name.to_string()),
            ],
        )
        .await
    }

    async fn sensor(&self, command: SensorCommand, sensor: &str) -> Result<()> {
        self.command(command.action(), &[("sensor", sensor.to_string())])
            .await
    }

    async fn log_lines(&self) -> Result<Vec<String>> {
        self.json("get/log", &[]).await
    }

    async fn rename_sensor_log(&self, log_name: &str, new_name: &str) -> Result<()> {
        self.command(
            "set/sensorlogs/rename",
            &[
                ("logname", log_name.to_string()),
                ("newname", new_name.to_string()),
            ],
        )
        .await
    }

    async fn delete_sensor_log(&self, log_name: &str) -> Result<()> {
        self.command("set/sensorlogs/delete", &[("logname", log_name.to_string())])
            .await
    }

    async fn start_log_replay(&self, log_name: &str) -> Result<()> {
        self.command(
            "set/sensorlogs/start-logread-realtime",
            &[("logname", log_name.to_string())],
        )
        .await
    }

    async fn stop_log_replay(&self) -> Result<()> {
        self.command("set/sensorlogs/stop-logread-realtime", &[]).await
    }

    async fn tile(&self, coord: TileCoord) -> Result<Vec<u8>> {
        self.bytes(
            "get/slam/image/tile/",
            &[
                ("zoomLevel", coord.z.to_string()),
                ("tileX", coord.x.to_string()),
                ("tileY", coord.y.to_string()),
            ],
        )
        .await
    }
}
