pub mod m202607010001_create_members;
pub mod m202607010002_create_attendance_records;
