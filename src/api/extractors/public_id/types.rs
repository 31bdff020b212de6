/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *
 * 置くもの
 *  - TodoTag などのタグ型
 *  - type PublicTodoId = PublicId<TodoTag> のような alias
 *
 * 置かないもの
 *  - decode ロジック / extractor 実装
 */
use super::core::PublicId;

// todos
pub enum TodoTag {}
pub type PublicTodoId = PublicId<TodoTag>;
