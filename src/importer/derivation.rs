// ==========================================
// 表格归一化工具 - 字段派生服务实现
// ==========================================
// 职责: milesFromHQ 派生（Haversine 大圆距离 + 小数位舍入）
// ==========================================

use crate::config::GeodesicConfig;
use crate::domain::GeoPoint;

/// Haversine 大圆距离
///
/// # 参数
/// - from / to: 十进制度坐标
/// - radius: 球体半径（结果单位与之相同）
///
/// # 公式
/// - a = sin²(Δφ/2) + cos φ1 · cos φ2 · sin²(Δλ/2)
/// - c = 2 · atan2(√a, √(1−a))
/// - d = R · c
pub fn haversine(from: GeoPoint, to: GeoPoint, radius: f64) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    radius * c
}

/// 按小数位四舍五入：round(x · 10^n) / 10^n
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

// ==========================================
// DistanceDerivation - 距离派生
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct DistanceDerivation {
    earth_radius_miles: f64,
    decimals: u32,
}

impl DistanceDerivation {
    pub fn new(earth_radius_miles: f64, decimals: u32) -> Self {
        Self {
            earth_radius_miles,
            decimals,
        }
    }

    pub fn from_config(config: &GeodesicConfig) -> Self {
        Self::new(config.earth_radius_miles, config.distance_decimals)
    }

    /// 两点距离（英里，已舍入）
    pub fn miles_between(&self, origin: GeoPoint, point: GeoPoint) -> f64 {
        round_to_decimals(haversine(origin, point, self.earth_radius_miles), self.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EARTH_RADIUS_MILES: f64 = 3958.8;

    #[test]
    fn test_haversine_same_point_is_zero() {
        let p = GeoPoint::new(40.0, -75.0);
        assert_eq!(haversine(p, p, EARTH_RADIUS_MILES), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let d = haversine(
            GeoPoint::new(40.0, -75.0),
            GeoPoint::new(41.0, -75.0),
            EARTH_RADIUS_MILES,
        );
        assert!((d - 69.0941).abs() < 1e-3, "distance was {d}");
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let a = GeoPoint::new(39.9526, -75.1652);
        let b = GeoPoint::new(40.7128, -74.0060);
        let ab = haversine(a, b, EARTH_RADIUS_MILES);
        let ba = haversine(b, a, EARTH_RADIUS_MILES);
        assert!((ab - ba).abs() < 1e-9);
        // 费城 → 纽约约 80 英里
        assert!(ab > 75.0 && ab < 85.0, "distance was {ab}");
    }

    #[test]
    fn test_round_to_decimals() {
        assert_eq!(round_to_decimals(69.094_123, 2), 69.09);
        assert_eq!(round_to_decimals(1.005_1, 2), 1.01);
        assert_eq!(round_to_decimals(12.5, 0), 13.0);
        assert_eq!(round_to_decimals(0.0, 2), 0.0);
    }

    #[test]
    fn test_miles_between_rounded() {
        let derivation = DistanceDerivation::new(EARTH_RADIUS_MILES, 2);
        let miles = derivation.miles_between(GeoPoint::new(40.0, -75.0), GeoPoint::new(41.0, -75.0));
        assert_eq!(miles, 69.09);
    }

    #[test]
    fn test_miles_between_at_most_two_decimals() {
        let derivation = DistanceDerivation::new(EARTH_RADIUS_MILES, 2);
        let origin = GeoPoint::new(40.0, -75.0);
        for (lat, lng) in [(40.123, -75.456), (33.7, -84.39), (47.61, -122.33), (-33.86, 151.2)] {
            let miles = derivation.miles_between(origin, GeoPoint::new(lat, lng));
            let text = serde_json::to_string(&miles).unwrap();
            let decimals = text.split('.').nth(1).map(|d| d.len()).unwrap_or(0);
            assert!(decimals <= 2, "{text} has more than two decimals");
        }
    }
}
