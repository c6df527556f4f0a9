use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    Diet,
    Medication,
    Exercise,
    Care,
}

impl CardCategory {
    pub fn label(self) -> &'static str {
        match self {
            CardCategory::Diet => "饮食指南",
            CardCategory::Medication => "用药须知",
            CardCategory::Exercise => "运动建议",
            CardCategory::Care => "日常护理",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeCard {
    pub id: String,
    pub category: CardCategory,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub saved: bool,
}

impl KnowledgeCard {
    fn matches_query(&self, query: &str) -> bool {
        query.is_empty()
            || self.title.contains(query)
            || self.content.contains(query)
            || self.tags.iter().any(|tag| tag.contains(query))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnowledgeFilter {
    #[default]
    All,
    Category(CardCategory),
    Saved,
}

impl KnowledgeFilter {
    fn admits(self, card: &KnowledgeCard) -> bool {
        match self {
            KnowledgeFilter::All => true,
            KnowledgeFilter::Category(category) => card.category == category,
            KnowledgeFilter::Saved => card.saved,
        }
    }
}

/// Cards admitted by `filter` whose title, content or tags contain `query`.
pub fn filter_cards<'a>(
    cards: &'a [KnowledgeCard],
    filter: KnowledgeFilter,
    query: &str,
) -> Vec<&'a KnowledgeCard> {
    let query = query.trim();
    cards
        .iter()
        .filter(|card| filter.admits(card) && card.matches_query(query))
        .collect()
}

/// Flips `saved` on one card. Returns the new value, or `None` if `id` is unknown.
pub fn toggle_save(cards: &mut [KnowledgeCard], id: &str) -> Option<bool> {
    let card = cards.iter_mut().find(|card| card.id == id)?;
    card.saved = !card.saved;
    Some(card.saved)
}

fn card(
    id: &str,
    category: CardCategory,
    title: &str,
    content: &str,
    tags: &[&str],
    saved: bool,
) -> KnowledgeCard {
    KnowledgeCard {
        id: id.to_string(),
        category,
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        saved,
    }
}

/// The built-in care knowledge base.
pub fn builtin_cards() -> Vec<KnowledgeCard> {
    vec![
        card(
            "k1",
            CardCategory::Diet,
            "高血压患者饮食指南",
            "控制钠盐摄入（每日<6g）；多吃新鲜蔬果、全谷物；减少饱和脂肪和反式脂肪；限制酒精摄入；推荐DASH饮食模式。每餐注意荤素搭配，少油少盐烹饪。",
            &["高血压", "饮食"],
            false,
        ),
        card(
            "k2",
            CardCategory::Medication,
            "常见降压药服用须知",
            "定时定量服药，不要随意停药或减量；注意监测血压变化；服药期间避免食用西柚；如出现头晕、乏力等不适及时就医；定期复查肝肾功能。",
            &["降压药", "用药"],
            false,
        ),
        card(
            "k3",
            CardCategory::Exercise,
            "老年人安全运动建议",
            "推荐每日30分钟中等强度运动如快走、太极拳；运动前做好热身；避免在过冷过热的环境中运动；运动后缓慢降速；如感到胸闷、气短应立即停止。",
            &["运动", "安全"],
            false,
        ),
        card(
            "k4",
            CardCategory::Care,
            "居家血压监测指南",
            "每天固定时间测量（推荐晨起和睡前）；测量前休息5分钟；保持坐姿，手臂与心脏同高；连续测量2次取平均值；做好记录便于就医时参考。",
            &["血压", "监测", "居家"],
            true,
        ),
        card(
            "k5",
            CardCategory::Diet,
            "糖尿病饮食管理",
            "控制总热量摄入；主食选择低GI食物（糙米、燕麦）；增加膳食纤维摄入；定时定量进餐；少食多餐；避免高糖饮料和甜食；注意食物的升糖指数。",
            &["糖尿病", "饮食"],
            false,
        ),
        card(
            "k6",
            CardCategory::Care,
            "老年人跌倒预防",
            "保持室内照明充足；清除地面障碍物；卫生间安装扶手和防滑垫；穿合脚防滑的鞋子；起床动作要慢（醒后躺30秒、坐30秒、站30秒）；定期检查视力。",
            &["跌倒", "安全", "居家"],
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(cards: &[&KnowledgeCard]) -> Vec<String> {
        cards.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_filter_by_category_and_saved() {
        let cards = builtin_cards();
        let diet = filter_cards(&cards, KnowledgeFilter::Category(CardCategory::Diet), "");
        assert_eq!(ids(&diet), vec!["k1", "k5"]);

        let saved = filter_cards(&cards, KnowledgeFilter::Saved, "");
        assert_eq!(ids(&saved), vec!["k4"]);

        assert_eq!(filter_cards(&cards, KnowledgeFilter::All, "").len(), cards.len());
    }

    #[test]
    fn test_query_matches_title_content_and_tags() {
        let cards = builtin_cards();
        assert_eq!(ids(&filter_cards(&cards, KnowledgeFilter::All, "跌倒")), vec!["k6"]);
        assert_eq!(ids(&filter_cards(&cards, KnowledgeFilter::All, "西柚")), vec!["k2"]);
        assert_eq!(
            ids(&filter_cards(&cards, KnowledgeFilter::All, "居家")),
            vec!["k4", "k6"]
        );
        assert_eq!(
            ids(&filter_cards(
                &cards,
                KnowledgeFilter::Category(CardCategory::Care),
                "安全"
            )),
            vec!["k6"]
        );
    }

    #[test]
    fn test_toggle_save() {
        let mut cards = builtin_cards();
        assert_eq!(toggle_save(&mut cards, "k1"), Some(true));
        assert_eq!(toggle_save(&mut cards, "k4"), Some(false));
        assert_eq!(toggle_save(&mut cards, "missing"), None);
        assert!(cards.iter().filter(|c| c.saved).all(|c| c.id == "k1"));
    }
}
