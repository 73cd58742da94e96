//! 日志初始化

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// 运行期调整日志级别的句柄
///
/// 配置文件要在日志初始化之后才读取，读到 `verbose_logging` 时再通过它提升级别。
pub struct LogHandle {
    reload: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// 切换到 debug / info；设置了 `RUST_LOG` 时以环境变量为准，不做改动
    pub fn set_verbose(&self, verbose: bool) {
        if self.from_env {
            return;
        }
        let _ = self.reload.reload(EnvFilter::new(default_level(verbose)));
    }
}

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// 初始化全局日志
///
/// `RUST_LOG` 优先；未设置时默认 `info`，`verbose` 为真时使用 `debug`。
/// 重复调用是安全的（测试中会多次初始化）。
pub fn init(verbose: bool) -> LogHandle {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_level(verbose)), false),
    };
    let (filter, reload) = reload::Layer::new(filter);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();

    LogHandle { reload, from_env }
}
