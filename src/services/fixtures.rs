//! Upstream-shaped HTML documents and a canned page source for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::services::PageFetcher;

/// Canned upstream keyed by the first query value (`currentPage` or
/// `seq_id`). Unknown keys answer with an empty listing.
#[derive(Default)]
pub struct CannedFetcher {
    pages: HashMap<String, Result<String, FetchError>>,
    calls: Mutex<Vec<String>>,
}

impl CannedFetcher {
    pub fn page(mut self, key: &str, response: Result<String, FetchError>) -> Self {
        self.pages.insert(key.to_string(), response);
        self
    }

    /// Keys requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for CannedFetcher {
    async fn fetch(&self, _url: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let key = query.first().map(|(_, v)| v.to_string()).unwrap_or_default();
        self.calls.lock().unwrap().push(key.clone());
        self.pages
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(empty_listing_page()))
    }
}

/// One listing row: (seq_id, court, debtor, title, views).
pub type Row<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str);

/// Render a listing page in the upstream layout: number, court, debtor,
/// linked title, views.
pub fn listing_page(rows: &[Row]) -> String {
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(i, (id, court, debtor, title, views))| {
            format!(
                r#"<tr>
                    <td>{num}</td>
                    <td>{court}</td>
                    <td>{debtor}</td>
                    <td class="left"><a href="/portal/notice/realestate/RealNoticeView.work?seq_id={id}&amp;currentPage=1">
                        {title}
                    </a></td>
                    <td>{views}</td>
                </tr>"#,
                num = rows.len() - i,
            )
        })
        .collect();
    wrap_listing(&body)
}

/// A listing page with one row per court. Ids are `{page}{index:02}`.
pub fn court_rows(page: u32, courts: &[&str]) -> String {
    let ids: Vec<String> = (0..courts.len()).map(|i| format!("{page}{i:02}")).collect();
    let titles: Vec<String> = (0..courts.len())
        .map(|i| format!("{page}페이지 부동산 매각 {i}"))
        .collect();
    let rows: Vec<Row> = courts
        .iter()
        .enumerate()
        .map(|(i, court)| (ids[i].as_str(), *court, "채무자", titles[i].as_str(), "0"))
        .collect();
    listing_page(&rows)
}

/// A listing page whose table body holds only the "no results" row.
pub fn empty_listing_page() -> String {
    wrap_listing(r#"<tr><td colspan="5">조회된 공고가 없습니다.</td></tr>"#)
}

fn wrap_listing(body: &str) -> String {
    format!(
        r#"<html><head><title>파산재산공고</title></head><body>
        <div id="content">
          <table class="tableHor">
            <thead><tr><th>번호</th><th>법원</th><th>채무자</th><th>제목</th><th>조회수</th></tr></thead>
            <tbody>{body}</tbody>
          </table>
          <div class="paging"><a href="?currentPage=2">2</a></div>
        </div></body></html>"#
    )
}

/// A page from which the listing table has disappeared.
pub const REDESIGNED_PAGE: &str = r#"<html><body>
    <div class="notice-list"><ul><li><a href="?seq_id=1">새 디자인</a></li></ul></div>
</body></html>"#;

/// A detail page with metadata table, body and two attachments.
pub const DETAIL_PAGE: &str = r#"<html><body>
  <div id="content">
    <h3 class="tit">  서울 강남구 아파트
        매각 공고 </h3>
    <table class="tableVer">
      <tr><th>법원</th><td>서울회생법원</td></tr>
      <tr><th>채무자</th><td>주식회사 한빛</td></tr>
      <tr><th>공고일</th><td>2024-03-02</td></tr>
    </table>
    <div class="view_cont">
      <p>파산재단 소유 부동산을 아래와 같이 매각합니다.</p>
      <p>입찰 마감: <b>2024-03-20</b></p>
      <script>trackView();</script>
    </div>
    <ul class="file">
      <li><a href="javascript:download('20240302_001.hwp','매각공고문.hwp')">매각공고문.hwp</a></li>
      <li><a href="/files/감정평가서.pdf">감정평가서</a></li>
      <li><a href="/portal/notice/realestate/RealNoticeList.work">목록</a></li>
    </ul>
  </div>
</body></html>"#;

/// A detail page with only the body container.
pub const BARE_DETAIL_PAGE: &str = r#"<html><body>
    <div class="content">내용만 있는 공고</div>
</body></html>"#;
