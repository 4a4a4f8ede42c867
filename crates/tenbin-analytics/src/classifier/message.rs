//! Statement kinds emitted by classification rules.

use serde::{Deserialize, Serialize};
use tenbin_core::format_number;

/// A statement a rule emits when it fires.
///
/// Each variant renders one Japanese sentence from the evaluated index's
/// value (`a`) and the benchmark's value (`b`) of the rule's metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// More sub-book names than the benchmark.
    PbrValueTilt,
    /// Fewer sub-book names than the benchmark.
    PbrValueLimited,
    /// PBR data missing.
    PbrDataGap,
    /// ROE median above the benchmark.
    RoeAtPar,
    /// ROE median below the benchmark.
    RoeLag,
    /// ROE data missing.
    RoeDataGap,
    /// Dividend yield above the benchmark.
    YieldPremium,
    /// Dividend yield below the benchmark.
    YieldShortfall,
    /// Dividend yield data missing.
    YieldDataGap,
    /// Sector HHI above the benchmark.
    SectorConcentrated,
    /// Sector HHI below the benchmark.
    SectorDiversified,
    /// Sector data missing.
    SectorDataGap,
    /// Top-10 weight missing.
    TopWeightDataGap,
}

impl Message {
    /// Renders the sentence.
    #[must_use]
    pub fn render(self, a: Option<f64>, b: Option<f64>) -> String {
        let diff = match (a, b) {
            (Some(a), Some(b)) => Some(a - b),
            _ => None,
        };
        let abs_diff = diff.map(f64::abs);
        let pt = |v: Option<f64>| format_number(v.map(|d| d * 100.0), 1);

        match self {
            Message::PbrValueTilt => format!(
                "PBR<1銘柄比率がTOPIXより{}pt高く、バリュー再評価の恩恵を受けやすい構造です。",
                pt(abs_diff)
            ),
            Message::PbrValueLimited => format!(
                "PBR<1銘柄比率がTOPIX比で{}pt低く、ディープバリュー特性は限定的です。",
                pt(abs_diff)
            ),
            Message::PbrDataGap => {
                "PBRデータが不足しており、バリュー特性の検証に不確実性があります。".to_string()
            }
            Message::RoeAtPar => format!(
                "ROE中央値がTOPIXと同等以上({} vs {})で、低ROEバイアスが軽減されています。",
                format_number(a, 2),
                format_number(b, 2)
            ),
            Message::RoeLag => format!(
                "ROE中央値がTOPIX比で{}ポイント低く、資本効率面での逆風が想定されます。",
                format_number(abs_diff, 2)
            ),
            Message::RoeDataGap => "ROE指標の欠損があり、収益性評価には注意が必要です。".to_string(),
            Message::YieldPremium => format!(
                "配当利回り平均がTOPIXを{}pt上回り、インカム面の魅力を維持しています。",
                format_number(abs_diff, 2)
            ),
            Message::YieldShortfall => format!(
                "配当利回り平均がTOPIXを{}pt下回り、インカム補完機能は限定的です。",
                format_number(abs_diff, 2)
            ),
            Message::YieldDataGap => {
                "配当利回りデータが欠落しており、インカム特性の評価が難しい状況です。".to_string()
            }
            Message::SectorConcentrated => format!(
                "セクターHHIがTOPIX({})より高く({})、集中度リスクが相対的に大きいです。",
                format_number(b, 3),
                format_number(a, 3)
            ),
            Message::SectorDiversified => format!(
                "セクターHHIが{}で、等ウェート設計による分散効果が確認できます。",
                format_number(a, 3)
            ),
            Message::SectorDataGap => "セクター情報不足により集中度のトレースが困難です。".to_string(),
            Message::TopWeightDataGap => {
                "上位構成比データが欠損しており、個別銘柄集中の検証に制約があります。".to_string()
            }
        }
    }
}
