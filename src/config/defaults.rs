//! Default configuration templates
//!
//! These are the values the NFD Parser service ships with. They are built
//! once, on first use, and never modified afterwards. Callers that need a
//! tree they can edit should use [`default_config`] / [`default_proxy_config`],
//! which hand out fresh copies.

use serde_json::{Value, json};
use std::sync::LazyLock;

/// Default `app.yml` template of the parser service.
///
/// Sections: `server`, `vertx`, `custom`, `rateLimit`, `dataSource`,
/// `cache` and `proxy`, in that order.
pub static DEFAULT_CONFIG: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "server": {
            "port": 6400,
            "contextPath": "/",
            "enableDatabase": true,
            "domainName": "http://127.0.0.1:6401",
            "previewURL": "https://nfd-parser.github.io/nfd-preview/preview.html?src="
        },
        "vertx": {
            "eventLoopPoolSize": 0,
            "workerPoolSize": 0
        },
        "custom": {
            "asyncServiceInstances": 4,
            "baseLocations": "cn.qaiu.lz",
            "routeTimeOut": 15000,
            "ignoresReg": [".*/test.*$"],
            "entityPackagesReg": ["^cn\\.qaiu\\.lz\\.web\\.model\\..*"]
        },
        "rateLimit": {
            "enable": true,
            "limit": 10,
            "timeWindow": 10,
            "pathReg": "^/v2/.*"
        },
        "dataSource": {
            "jdbcUrl": "jdbc:h2:file:./db/nfdData;MODE=MySQL;DATABASE_TO_UPPER=FALSE",
            "username": "root",
            "password": "123456"
        },
        "cache": {
            "type": "h2db",
            "defaultDuration": 59,
            "duration": {
                "ce": 5,
                "cow": 5,
                "ec": 5,
                "fj": 20,
                "iz": 20,
                "le": 2879,
                "lz": 20,
                "qq": 9999999,
                "qqw": 30,
                "ws": 10,
                "ye": -1,
                "mne": 30,
                "mqq": 30,
                "mkg": 30,
                "p115": 30,
                "ct": 30
            }
        },
        "proxy": []
    })
});

/// Default `server-proxy.yml` template (the bundled reverse proxy).
pub static DEFAULT_PROXY_CONFIG: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "server-name": "Vert.x-proxy-server(v4.1.2)",
        "proxy": [{
            "listen": 6401,
            "page404": "webroot/err/404.html",
            "static": {
                "path": "/",
                "add-headers": {
                    "x-token": "ABC"
                },
                "root": "webroot/nfd-front/"
            },
            "location": [
                {
                    "path": "~^/(json/|v2/|d/|parser|ye/|lz/|cow/|ec/|fj/|fc/|le/|qq/|ws/|iz/|ce/).*",
                    "origin": "127.0.0.1:6400"
                },
                {
                    "path": "/n1/",
                    "origin": "127.0.0.1:6400/v2/"
                }
            ],
            "ssl": {
                "enable": false,
                "ssl_protocols": "TLSv1.2",
                "ssl_certificate": "ssl/server.pem",
                "ssl_certificate_key": "ssl/privkey.key"
            }
        }]
    })
});

/// Fresh copy of the default service configuration.
#[must_use]
pub fn default_config() -> Value {
    DEFAULT_CONFIG.clone()
}

/// Fresh copy of the default proxy configuration.
#[must_use]
pub fn default_proxy_config() -> Value {
    DEFAULT_PROXY_CONFIG.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sections_in_order() {
        let config = default_config();
        let keys: Vec<&str> = config
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(
            keys,
            vec![
                "server",
                "vertx",
                "custom",
                "rateLimit",
                "dataSource",
                "cache",
                "proxy"
            ]
        );
    }

    #[test]
    fn test_default_values() {
        let config = default_config();

        assert_eq!(config["server"]["port"], 6400);
        assert_eq!(config["rateLimit"]["pathReg"], "^/v2/.*");
        assert_eq!(config["cache"]["duration"]["ye"], -1);
        assert_eq!(config["custom"]["ignoresReg"], json!([".*/test.*$"]));
        assert_eq!(config["proxy"], json!([]));
    }

    #[test]
    fn test_copies_are_independent() {
        let mut copy = default_config();
        copy["server"]["port"] = json!(1);

        assert_eq!(DEFAULT_CONFIG["server"]["port"], 6400);
    }

    #[test]
    fn test_proxy_template() {
        let proxy = default_proxy_config();

        assert_eq!(proxy["proxy"][0]["listen"], 6401);
        assert_eq!(proxy["proxy"][0]["location"].as_array().unwrap().len(), 2);
        assert_eq!(proxy["proxy"][0]["ssl"]["enable"], false);
    }
}
