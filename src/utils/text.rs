//! Text helpers: charset detection for fetched sources and
//! traditional-to-simplified Chinese conversion for channel names.

use std::collections::HashMap;
use std::sync::OnceLock;

use encoding_rs::{Encoding, GB18030, GBK, UTF_8, WINDOWS_1252};

/// Decode raw bytes by trying each candidate charset in order.
///
/// Returns the decoded text and the name of the charset that accepted the
/// bytes, or `None` when every candidate rejects them. The order matters:
/// UTF-8 first so well-formed modern sources win, then the GB family common
/// in mainland playlists, then windows-1252 as the terminal fallback.
pub fn decode_with_fallback(bytes: &[u8]) -> Option<(String, &'static str)> {
    const CANDIDATES: [&Encoding; 4] = [UTF_8, GBK, GB18030, WINDOWS_1252];
    for encoding in CANDIDATES {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            return Some((text.into_owned(), encoding.name()));
        }
    }
    None
}

/// Convert traditional Chinese characters to simplified, character by
/// character. Characters without a mapping pass through unchanged, so the
/// conversion degrades gracefully on rare hanzi.
pub fn to_simplified(input: &str) -> String {
    let table = simplified_table();
    input
        .chars()
        .map(|c| table.get(&c).copied().unwrap_or(c))
        .collect()
}

fn simplified_table() -> &'static HashMap<char, char> {
    static TABLE: OnceLock<HashMap<char, char>> = OnceLock::new();
    TABLE.get_or_init(|| TRAD_SIMP_PAIRS.iter().copied().collect())
}

/// Traditional/simplified pairs covering the characters that actually show
/// up in channel names (station names, provinces, genres) plus the common
/// general vocabulary.
const TRAD_SIMP_PAIRS: &[(char, char)] = &[
    ('萬', '万'), ('與', '与'), ('專', '专'), ('業', '业'), ('叢', '丛'), ('東', '东'), ('絲', '丝'), ('丟', '丢'),
    ('兩', '两'), ('嚴', '严'), ('喪', '丧'), ('個', '个'), ('豐', '丰'), ('臨', '临'), ('為', '为'), ('麗', '丽'),
    ('舉', '举'), ('義', '义'), ('烏', '乌'), ('樂', '乐'), ('喬', '乔'), ('習', '习'), ('鄉', '乡'), ('書', '书'),
    ('買', '买'), ('亂', '乱'), ('雲', '云'), ('億', '亿'), ('僅', '仅'), ('從', '从'), ('倉', '仓'), ('儀', '仪'),
    ('們', '们'), ('價', '价'), ('眾', '众'), ('衆', '众'), ('優', '优'), ('會', '会'), ('傳', '传'), ('傷', '伤'),
    ('倫', '伦'), ('偽', '伪'), ('體', '体'), ('餘', '余'), ('俠', '侠'), ('側', '侧'), ('僑', '侨'), ('儉', '俭'),
    ('債', '债'), ('傾', '倾'), ('償', '偿'), ('儲', '储'), ('兒', '儿'), ('黨', '党'), ('蘭', '兰'), ('關', '关'),
    ('興', '兴'), ('養', '养'), ('獸', '兽'), ('內', '内'), ('岡', '冈'), ('冊', '册'), ('寫', '写'), ('軍', '军'),
    ('農', '农'), ('馮', '冯'), ('衝', '冲'), ('沖', '冲'), ('決', '决'), ('況', '况'), ('凍', '冻'), ('淨', '净'),
    ('涼', '凉'), ('減', '减'), ('幾', '几'), ('鳳', '凤'), ('憑', '凭'), ('凱', '凯'), ('擊', '击'), ('劃', '划'),
    ('劉', '刘'), ('則', '则'), ('剛', '刚'), ('創', '创'), ('刪', '删'), ('別', '别'), ('劍', '剑'), ('劇', '剧'),
    ('勸', '劝'), ('辦', '办'), ('務', '务'), ('動', '动'), ('勵', '励'), ('勁', '劲'), ('勞', '劳'), ('勢', '势'),
    ('勝', '胜'), ('勳', '勋'), ('勻', '匀'), ('區', '区'), ('醫', '医'), ('華', '华'), ('協', '协'), ('單', '单'),
    ('賣', '卖'), ('盧', '卢'), ('鹵', '卤'), ('臥', '卧'), ('衛', '卫'), ('衞', '卫'), ('廠', '厂'), ('廳', '厅'),
    ('歷', '历'), ('厲', '厉'), ('壓', '压'), ('厭', '厌'), ('廁', '厕'), ('廈', '厦'), ('廚', '厨'), ('縣', '县'),
    ('參', '参'), ('雙', '双'), ('發', '发'), ('髮', '发'), ('變', '变'), ('敘', '叙'), ('疊', '叠'), ('葉', '叶'),
    ('號', '号'), ('嘆', '叹'), ('歎', '叹'), ('後', '后'), ('嚇', '吓'), ('呂', '吕'), ('嗎', '吗'), ('噸', '吨'),
    ('聽', '听'), ('啟', '启'), ('吳', '吴'), ('嘔', '呕'), ('員', '员'), ('嗚', '呜'), ('詠', '咏'), ('響', '响'),
    ('啞', '哑'), ('喚', '唤'), ('問', '问'), ('噴', '喷'), ('團', '团'), ('園', '园'), ('圍', '围'), ('國', '国'),
    ('圖', '图'), ('圓', '圆'), ('聖', '圣'), ('場', '场'), ('壞', '坏'), ('塊', '块'), ('堅', '坚'), ('壇', '坛'),
    ('壩', '坝'), ('墳', '坟'), ('壘', '垒'), ('墾', '垦'), ('墊', '垫'), ('塵', '尘'), ('堯', '尧'), ('報', '报'),
    ('壺', '壶'), ('壽', '寿'), ('壯', '壮'), ('夠', '够'), ('夢', '梦'), ('夾', '夹'), ('奪', '夺'), ('奮', '奋'),
    ('妝', '妆'), ('婦', '妇'), ('媽', '妈'), ('姦', '奸'), ('娛', '娱'), ('婁', '娄'), ('嬰', '婴'), ('嬌', '娇'),
    ('孫', '孙'), ('學', '学'), ('寧', '宁'), ('寶', '宝'), ('實', '实'), ('寵', '宠'), ('審', '审'), ('憲', '宪'),
    ('宮', '宫'), ('寬', '宽'), ('賓', '宾'), ('寢', '寝'), ('對', '对'), ('尋', '寻'), ('導', '导'), ('將', '将'),
    ('爾', '尔'), ('嘗', '尝'), ('層', '层'), ('屆', '届'), ('屬', '属'), ('屢', '屡'), ('嶼', '屿'), ('歲', '岁'),
    ('豈', '岂'), ('崗', '岗'), ('嵐', '岚'), ('島', '岛'), ('嶺', '岭'), ('嶽', '岳'), ('巔', '巅'), ('鞏', '巩'),
    ('幣', '币'), ('帥', '帅'), ('師', '师'), ('帳', '帐'), ('簾', '帘'), ('幟', '帜'), ('帶', '带'), ('幀', '帧'),
    ('幫', '帮'), ('幹', '干'), ('乾', '干'), ('並', '并'), ('廣', '广'), ('莊', '庄'), ('慶', '庆'), ('廬', '庐'),
    ('庫', '库'), ('應', '应'), ('廟', '庙'), ('龐', '庞'), ('廢', '废'), ('開', '开'), ('異', '异'), ('棄', '弃'),
    ('張', '张'), ('彌', '弥'), ('彎', '弯'), ('彈', '弹'), ('強', '强'), ('歸', '归'), ('當', '当'), ('噹', '当'),
    ('錄', '录'), ('彙', '汇'), ('匯', '汇'), ('徹', '彻'), ('徑', '径'), ('禦', '御'), ('憶', '忆'), ('憂', '忧'),
    ('懷', '怀'), ('態', '态'), ('悵', '怅'), ('憐', '怜'), ('總', '总'), ('戀', '恋'), ('懇', '恳'), ('惡', '恶'),
    ('愷', '恺'), ('惱', '恼'), ('悅', '悦'), ('懸', '悬'), ('悶', '闷'), ('驚', '惊'), ('懼', '惧'), ('慘', '惨'),
    ('懲', '惩'), ('憊', '惫'), ('慣', '惯'), ('憤', '愤'), ('憫', '悯'), ('慚', '惭'), ('懶', '懒'), ('戲', '戏'),
    ('戰', '战'), ('戶', '户'), ('紮', '扎'), ('撲', '扑'), ('執', '执'), ('擴', '扩'), ('掃', '扫'), ('揚', '扬'),
    ('擾', '扰'), ('撫', '抚'), ('拋', '抛'), ('搶', '抢'), ('護', '护'), ('擔', '担'), ('擰', '拧'), ('擇', '择'),
    ('擠', '挤'), ('擺', '摆'), ('攔', '拦'), ('撓', '挠'), ('擋', '挡'), ('揀', '拣'), ('擁', '拥'), ('攏', '拢'),
    ('攬', '揽'), ('撿', '捡'), ('擲', '掷'), ('撈', '捞'), ('損', '损'), ('捨', '舍'), ('換', '换'), ('搗', '捣'),
    ('據', '据'), ('攝', '摄'), ('攜', '携'), ('搖', '摇'), ('擱', '搁'), ('攤', '摊'), ('撐', '撑'), ('攪', '搅'),
    ('敵', '敌'), ('斂', '敛'), ('數', '数'), ('齋', '斋'), ('鬥', '斗'), ('斬', '斩'), ('斷', '断'), ('無', '无'),
    ('舊', '旧'), ('時', '时'), ('曠', '旷'), ('昇', '升'), ('晝', '昼'), ('顯', '显'), ('晉', '晋'), ('曬', '晒'),
    ('曉', '晓'), ('暈', '晕'), ('暉', '晖'), ('朮', '术'), ('術', '术'), ('樸', '朴'), ('機', '机'), ('殺', '杀'),
    ('雜', '杂'), ('權', '权'), ('條', '条'), ('來', '来'), ('楊', '杨'), ('傑', '杰'), ('極', '极'), ('構', '构'),
    ('樞', '枢'), ('棗', '枣'), ('槍', '枪'), ('楓', '枫'), ('櫃', '柜'), ('檸', '柠'), ('柵', '栅'), ('標', '标'),
    ('棧', '栈'), ('棟', '栋'), ('欄', '栏'), ('樹', '树'), ('棲', '栖'), ('樣', '样'), ('桿', '杆'), ('檢', '检'),
    ('橢', '椭'), ('樓', '楼'), ('欖', '榄'), ('榮', '荣'), ('檻', '槛'), ('橫', '横'), ('櫻', '樱'), ('櫥', '橱'),
    ('歡', '欢'), ('歐', '欧'), ('毆', '殴'), ('欽', '钦'), ('殘', '残'), ('殯', '殡'), ('殲', '歼'), ('毀', '毁'),
    ('畢', '毕'), ('斃', '毙'), ('氈', '毡'), ('氣', '气'), ('氫', '氢'), ('漢', '汉'), ('汙', '污'), ('湯', '汤'),
    ('洶', '汹'), ('溝', '沟'), ('沒', '没'), ('瀝', '沥'), ('淪', '沦'), ('滄', '沧'), ('滬', '沪'), ('濘', '泞'),
    ('淚', '泪'), ('瀘', '泸'), ('瀉', '泻'), ('潑', '泼'), ('澤', '泽'), ('潔', '洁'), ('灑', '洒'), ('窪', '洼'),
    ('淺', '浅'), ('漿', '浆'), ('澆', '浇'), ('濁', '浊'), ('測', '测'), ('濟', '济'), ('瀏', '浏'), ('渾', '浑'),
    ('濃', '浓'), ('濤', '涛'), ('澇', '涝'), ('漣', '涟'), ('渦', '涡'), ('滌', '涤'), ('潤', '润'), ('澗', '涧'),
    ('漲', '涨'), ('澀', '涩'), ('淵', '渊'), ('漬', '渍'), ('漸', '渐'), ('漁', '渔'), ('瀋', '沈'), ('滲', '渗'),
    ('溫', '温'), ('遊', '游'), ('灣', '湾'), ('濕', '湿'), ('潰', '溃'), ('濺', '溅'), ('滾', '滚'), ('滯', '滞'),
    ('滿', '满'), ('濾', '滤'), ('濫', '滥'), ('濱', '滨'), ('灘', '滩'), ('瀟', '潇'), ('濰', '潍'), ('潛', '潜'),
    ('澱', '淀'), ('瀾', '澜'), ('瀕', '濒'), ('災', '灾'), ('燦', '灿'), ('爐', '炉'), ('燉', '炖'), ('點', '点'),
    ('煉', '炼'), ('熾', '炽'), ('爍', '烁'), ('爛', '烂'), ('燭', '烛'), ('煙', '烟'), ('煩', '烦'), ('燒', '烧'),
    ('燴', '烩'), ('燙', '烫'), ('燼', '烬'), ('熱', '热'), ('煥', '焕'), ('愛', '爱'), ('爺', '爷'), ('牽', '牵'),
    ('犧', '牺'), ('狀', '状'), ('猶', '犹'), ('狽', '狈'), ('獨', '独'), ('狹', '狭'), ('獅', '狮'), ('猙', '狰'),
    ('獄', '狱'), ('獵', '猎'), ('豬', '猪'), ('貓', '猫'), ('獻', '献'), ('璽', '玺'), ('瑪', '玛'), ('瓏', '珑'),
    ('環', '环'), ('現', '现'), ('瑣', '琐'), ('瓊', '琼'), ('電', '电'), ('畫', '画'), ('暢', '畅'), ('療', '疗'),
    ('瘡', '疮'), ('瘋', '疯'), ('癢', '痒'), ('瘓', '痪'), ('癡', '痴'), ('癱', '瘫'), ('癮', '瘾'), ('皺', '皱'),
    ('盞', '盏'), ('鹽', '盐'), ('監', '监'), ('蓋', '盖'), ('盜', '盗'), ('盤', '盘'), ('盡', '尽'), ('儘', '尽'),
    ('睜', '睁'), ('睞', '睐'), ('瞞', '瞒'), ('矚', '瞩'), ('矯', '矫'), ('礦', '矿'), ('碼', '码'), ('磚', '砖'),
    ('礎', '础'), ('碩', '硕'), ('確', '确'), ('礙', '碍'), ('禮', '礼'), ('禱', '祷'), ('禍', '祸'), ('祿', '禄'),
    ('禪', '禅'), ('離', '离'), ('種', '种'), ('積', '积'), ('稱', '称'), ('穢', '秽'), ('穩', '稳'), ('窮', '穷'),
    ('竊', '窃'), ('竅', '窍'), ('窯', '窑'), ('竄', '窜'), ('窩', '窝'), ('窺', '窥'), ('豎', '竖'), ('競', '竞'),
    ('筆', '笔'), ('籠', '笼'), ('籬', '篱'), ('築', '筑'), ('篤', '笃'), ('籌', '筹'), ('簽', '签'), ('簡', '简'),
    ('籃', '篮'), ('類', '类'), ('粵', '粤'), ('糞', '粪'), ('糧', '粮'), ('緻', '致'), ('糾', '纠'), ('紅', '红'),
    ('纖', '纤'), ('約', '约'), ('級', '级'), ('紀', '纪'), ('緯', '纬'), ('純', '纯'), ('紗', '纱'), ('綱', '纲'),
    ('納', '纳'), ('縱', '纵'), ('紛', '纷'), ('紙', '纸'), ('紋', '纹'), ('紡', '纺'), ('紐', '纽'), ('線', '线'),
    ('綫', '线'), ('紹', '绍'), ('繹', '绎'), ('經', '经'), ('綁', '绑'), ('絨', '绒'), ('結', '结'), ('繞', '绕'),
    ('繪', '绘'), ('給', '给'), ('絢', '绚'), ('絡', '络'), ('絕', '绝'), ('絞', '绞'), ('統', '统'), ('絹', '绢'),
    ('繡', '绣'), ('繼', '继'), ('績', '绩'), ('緒', '绪'), ('續', '续'), ('繩', '绳'), ('維', '维'), ('綿', '绵'),
    ('繃', '绷'), ('綢', '绸'), ('綜', '综'), ('綻', '绽'), ('綠', '绿'), ('綴', '缀'), ('緬', '缅'), ('緝', '缉'),
    ('編', '编'), ('緣', '缘'), ('緞', '缎'), ('緩', '缓'), ('締', '缔'), ('縷', '缕'), ('緊', '紧'), ('縛', '缚'),
    ('縫', '缝'), ('繽', '缤'), ('纓', '缨'), ('縮', '缩'), ('纜', '缆'), ('繳', '缴'), ('辮', '辫'), ('繭', '茧'),
    ('纏', '缠'), ('罰', '罚'), ('罵', '骂'), ('罷', '罢'), ('羅', '罗'), ('羨', '羡'), ('翹', '翘'), ('聳', '耸'),
    ('恥', '耻'), ('聾', '聋'), ('職', '职'), ('聯', '联'), ('聰', '聪'), ('肅', '肃'), ('腸', '肠'), ('膚', '肤'),
    ('腎', '肾'), ('腫', '肿'), ('脹', '胀'), ('脅', '胁'), ('膽', '胆'), ('膠', '胶'), ('脈', '脉'), ('髒', '脏'),
    ('腦', '脑'), ('膿', '脓'), ('腳', '脚'), ('脫', '脱'), ('臉', '脸'), ('臘', '腊'), ('膩', '腻'), ('騰', '腾'),
    ('輿', '舆'), ('艦', '舰'), ('艙', '舱'), ('艱', '艰'), ('豔', '艳'), ('艷', '艳'), ('藝', '艺'), ('節', '节'),
    ('蕪', '芜'), ('蘆', '芦'), ('葦', '苇'), ('蒼', '苍'), ('蘇', '苏'), ('蘋', '苹'), ('範', '范'), ('莖', '茎'),
    ('荊', '荆'), ('薦', '荐'), ('薈', '荟'), ('蕩', '荡'), ('葷', '荤'), ('熒', '荧'), ('蔭', '荫'), ('藥', '药'),
    ('蓮', '莲'), ('獲', '获'), ('瑩', '莹'), ('鶯', '莺'), ('蘿', '萝'), ('螢', '萤'), ('營', '营'), ('蕭', '萧'),
    ('薩', '萨'), ('蔥', '葱'), ('蔣', '蒋'), ('藍', '蓝'), ('蘊', '蕴'), ('虜', '虏'), ('慮', '虑'), ('虛', '虚'),
    ('蟲', '虫'), ('雖', '虽'), ('蝦', '虾'), ('螞', '蚂'), ('蟻', '蚁'), ('蠔', '蚝'), ('蝕', '蚀'), ('蠅', '蝇'),
    ('蟈', '蝈'), ('蟬', '蝉'), ('蛻', '蜕'), ('蠶', '蚕'), ('蠻', '蛮'), ('銜', '衔'), ('補', '补'), ('襯', '衬'),
    ('裝', '装'), ('襖', '袄'), ('褲', '裤'), ('襪', '袜'), ('襲', '袭'), ('見', '见'), ('觀', '观'), ('規', '规'),
    ('覓', '觅'), ('視', '视'), ('覽', '览'), ('覺', '觉'), ('觸', '触'), ('譽', '誉'), ('計', '计'), ('訂', '订'),
    ('認', '认'), ('譏', '讥'), ('討', '讨'), ('讓', '让'), ('訓', '训'), ('議', '议'), ('訊', '讯'), ('記', '记'),
    ('講', '讲'), ('諱', '讳'), ('許', '许'), ('訝', '讶'), ('訛', '讹'), ('論', '论'), ('訟', '讼'), ('諷', '讽'),
    ('設', '设'), ('訪', '访'), ('訣', '诀'), ('證', '证'), ('評', '评'), ('詛', '诅'), ('識', '识'), ('詐', '诈'),
    ('訴', '诉'), ('診', '诊'), ('詞', '词'), ('譯', '译'), ('試', '试'), ('詩', '诗'), ('誠', '诚'), ('誅', '诛'),
    ('話', '话'), ('誕', '诞'), ('詮', '诠'), ('詭', '诡'), ('詢', '询'), ('該', '该'), ('詳', '详'), ('詫', '诧'),
    ('誡', '诫'), ('誣', '诬'), ('語', '语'), ('誤', '误'), ('誘', '诱'), ('說', '说'), ('誦', '诵'), ('請', '请'),
    ('諸', '诸'), ('諾', '诺'), ('讀', '读'), ('誹', '诽'), ('課', '课'), ('誰', '谁'), ('調', '调'), ('諒', '谅'),
    ('談', '谈'), ('誼', '谊'), ('謀', '谋'), ('諜', '谍'), ('謊', '谎'), ('諧', '谐'), ('謂', '谓'), ('諺', '谚'),
    ('諦', '谛'), ('謎', '谜'), ('謝', '谢'), ('謠', '谣'), ('謗', '谤'), ('謙', '谦'), ('謹', '谨'), ('謬', '谬'),
    ('譚', '谭'), ('譜', '谱'), ('譴', '谴'), ('讚', '赞'), ('贊', '赞'), ('貝', '贝'), ('貞', '贞'), ('負', '负'),
    ('貢', '贡'), ('財', '财'), ('責', '责'), ('賢', '贤'), ('敗', '败'), ('賬', '账'), ('貨', '货'), ('質', '质'),
    ('販', '贩'), ('貪', '贪'), ('貧', '贫'), ('貶', '贬'), ('購', '购'), ('貫', '贯'), ('賤', '贱'), ('貼', '贴'),
    ('貴', '贵'), ('貸', '贷'), ('貿', '贸'), ('費', '费'), ('賀', '贺'), ('賊', '贼'), ('賈', '贾'), ('賄', '贿'),
    ('賃', '赁'), ('資', '资'), ('賦', '赋'), ('賭', '赌'), ('贖', '赎'), ('賞', '赏'), ('賜', '赐'), ('賠', '赔'),
    ('賴', '赖'), ('賺', '赚'), ('賽', '赛'), ('贈', '赠'), ('贏', '赢'), ('趙', '赵'), ('趕', '赶'), ('趨', '趋'),
    ('躍', '跃'), ('跡', '迹'), ('踐', '践'), ('蹤', '踪'), ('軀', '躯'), ('車', '车'), ('軌', '轨'), ('軒', '轩'),
    ('轉', '转'), ('輪', '轮'), ('軟', '软'), ('轟', '轰'), ('轎', '轿'), ('軸', '轴'), ('輕', '轻'), ('載', '载'),
    ('較', '较'), ('輔', '辅'), ('輛', '辆'), ('輩', '辈'), ('輝', '辉'), ('輻', '辐'), ('輯', '辑'), ('輸', '输'),
    ('轄', '辖'), ('辭', '辞'), ('辯', '辩'), ('邊', '边'), ('遼', '辽'), ('達', '达'), ('遷', '迁'), ('過', '过'),
    ('邁', '迈'), ('運', '运'), ('還', '还'), ('這', '这'), ('進', '进'), ('遠', '远'), ('違', '违'), ('連', '连'),
    ('遲', '迟'), ('適', '适'), ('選', '选'), ('遜', '逊'), ('遞', '递'), ('邏', '逻'), ('遺', '遗'), ('遙', '遥'),
    ('鄧', '邓'), ('郵', '邮'), ('鄒', '邹'), ('鄰', '邻'), ('鬱', '郁'), ('鄭', '郑'), ('醬', '酱'), ('釀', '酿'),
    ('釋', '释'), ('裏', '里'), ('裡', '里'), ('鑒', '鉴'), ('針', '针'), ('釘', '钉'), ('釣', '钓'), ('鈣', '钙'),
    ('鈦', '钛'), ('鈍', '钝'), ('鈔', '钞'), ('鈉', '钠'), ('鋼', '钢'), ('鑰', '钥'), ('鉤', '钩'), ('銀', '银'),
    ('銅', '铜'), ('鋁', '铝'), ('錫', '锡'), ('鉛', '铅'), ('鏈', '链'), ('鎖', '锁'), ('鍋', '锅'), ('錯', '错'),
    ('錢', '钱'), ('鋪', '铺'), ('鑄', '铸'), ('鍛', '锻'), ('鋒', '锋'), ('鎮', '镇'), ('鏡', '镜'), ('鍵', '键'),
    ('錦', '锦'), ('鎊', '镑'), ('鐵', '铁'), ('鈴', '铃'), ('鉗', '钳'), ('銘', '铭'), ('鋤', '锄'), ('銹', '锈'),
    ('鑼', '锣'), ('錘', '锤'), ('鏟', '铲'), ('鋸', '锯'), ('鍍', '镀'), ('鎂', '镁'), ('鎳', '镍'), ('鑽', '钻'),
    ('鑲', '镶'), ('鍾', '钟'), ('鐘', '钟'), ('長', '长'), ('門', '门'), ('閃', '闪'), ('閉', '闭'), ('闖', '闯'),
    ('閏', '闰'), ('閑', '闲'), ('間', '间'), ('閘', '闸'), ('鬧', '闹'), ('聞', '闻'), ('閩', '闽'), ('閥', '阀'),
    ('閣', '阁'), ('閱', '阅'), ('闡', '阐'), ('闊', '阔'), ('隊', '队'), ('陽', '阳'), ('陰', '阴'), ('陣', '阵'),
    ('階', '阶'), ('際', '际'), ('陸', '陆'), ('陳', '陈'), ('陝', '陕'), ('隕', '陨'), ('險', '险'), ('隨', '随'),
    ('隱', '隐'), ('隸', '隶'), ('難', '难'), ('雛', '雏'), ('靂', '雳'), ('霧', '雾'), ('靈', '灵'), ('靚', '靓'),
    ('靜', '静'), ('韋', '韦'), ('韌', '韧'), ('韓', '韩'), ('韻', '韵'), ('頁', '页'), ('頂', '顶'), ('頃', '顷'),
    ('項', '项'), ('順', '顺'), ('須', '须'), ('鬚', '须'), ('頑', '顽'), ('顧', '顾'), ('頓', '顿'), ('頒', '颁'),
    ('頌', '颂'), ('預', '预'), ('領', '领'), ('頗', '颇'), ('頸', '颈'), ('頰', '颊'), ('頻', '频'), ('穎', '颖'),
    ('顆', '颗'), ('題', '题'), ('顏', '颜'), ('額', '额'), ('顛', '颠'), ('顫', '颤'), ('風', '风'), ('飄', '飘'),
    ('飆', '飙'), ('飛', '飞'), ('飢', '饥'), ('飯', '饭'), ('飲', '饮'), ('飾', '饰'), ('飽', '饱'), ('飼', '饲'),
    ('餃', '饺'), ('餅', '饼'), ('餓', '饿'), ('餡', '馅'), ('館', '馆'), ('饋', '馈'), ('饞', '馋'), ('饅', '馒'),
    ('饒', '饶'), ('馬', '马'), ('馴', '驯'), ('馳', '驰'), ('驅', '驱'), ('駁', '驳'), ('駛', '驶'), ('駝', '驼'),
    ('駐', '驻'), ('駒', '驹'), ('駕', '驾'), ('駭', '骇'), ('駱', '骆'), ('駿', '骏'), ('騎', '骑'), ('騙', '骗'),
    ('騷', '骚'), ('騾', '骡'), ('驗', '验'), ('驟', '骤'), ('驢', '驴'), ('鬆', '松'), ('魚', '鱼'), ('魯', '鲁'),
    ('鮮', '鲜'), ('鯉', '鲤'), ('鯊', '鲨'), ('鯨', '鲸'), ('鱷', '鳄'), ('鳥', '鸟'), ('雞', '鸡'), ('鳴', '鸣'),
    ('鷗', '鸥'), ('鴉', '鸦'), ('鴨', '鸭'), ('鴦', '鸯'), ('鴛', '鸳'), ('鴿', '鸽'), ('鵝', '鹅'), ('鵡', '鹉'),
    ('鵲', '鹊'), ('鵬', '鹏'), ('鶴', '鹤'), ('鸚', '鹦'), ('麥', '麦'), ('麵', '面'), ('黃', '黄'), ('齊', '齐'),
    ('齒', '齿'), ('齡', '龄'), ('龍', '龙'), ('龔', '龚'), ('龜', '龟'), ('誌', '志'), ('製', '制'), ('復', '复'),
    ('複', '复'), ('穀', '谷'), ('係', '系'), ('繫', '系'), ('徵', '征'), ('錶', '表'), ('準', '准'), ('臺', '台'),
    ('檯', '台'), ('颱', '台'), ('齣', '出'), ('隻', '只'), ('慾', '欲'), ('捲', '卷'), ('迴', '回'), ('傢', '家'),
    ('亞', '亚'), ('於', '于'), ('虧', '亏'), ('畝', '亩'), ('親', '亲'), ('麼', '么'), ('妳', '你'),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_simplified_station_names() {
        assert_eq!(to_simplified("鳳凰衛視中文台"), "凤凰卫视中文台");
        assert_eq!(to_simplified("無綫新聞台"), "无线新闻台");
        assert_eq!(to_simplified("臺灣電視劇"), "台湾电视剧");
    }

    #[test]
    fn test_to_simplified_passes_through() {
        assert_eq!(to_simplified("CCTV1综合"), "CCTV1综合");
        assert_eq!(to_simplified(""), "");
    }

    #[test]
    fn test_decode_utf8_first() {
        let (text, charset) = decode_with_fallback("湖南卫视".as_bytes()).unwrap();
        assert_eq!(text, "湖南卫视");
        assert_eq!(charset, "UTF-8");
    }

    #[test]
    fn test_decode_falls_back_past_invalid_utf8() {
        // 0xD6 0x44 is not valid UTF-8 (continuation byte missing) but is a
        // well-formed GBK two-byte code.
        let (_, charset) = decode_with_fallback(&[0xD6, 0x44]).unwrap();
        assert_eq!(charset, "GBK");
    }

    #[test]
    fn test_decode_terminal_fallback_accepts_anything() {
        let (_, charset) = decode_with_fallback(&[0xFF, 0xFE, 0xFD]).unwrap();
        assert_eq!(charset, "windows-1252");
    }
}
