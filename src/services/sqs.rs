service_statement! {
    /// Statement builder for Amazon SQS (`sqs`).
    Sqs, "sqs";
    actions {
        to_add_permission => "AddPermission", PermissionsManagement;
        to_cancel_message_move_task => "CancelMessageMoveTask", Write;
        to_change_message_visibility => "ChangeMessageVisibility", Write;
        to_create_queue => "CreateQueue", Write;
        to_delete_message => "DeleteMessage", Write;
        to_delete_queue => "DeleteQueue", Write;
        to_get_queue_attributes => "GetQueueAttributes", Read;
        to_get_queue_url => "GetQueueUrl", Read;
        to_list_dead_letter_source_queues => "ListDeadLetterSourceQueues", Read;
        to_list_message_move_tasks => "ListMessageMoveTasks", Read;
        to_list_queue_tags => "ListQueueTags", Read;
        to_list_queues => "ListQueues", List;
        to_purge_queue => "PurgeQueue", Write;
        to_receive_message => "ReceiveMessage", Read;
        to_remove_permission => "RemovePermission", PermissionsManagement;
        to_send_message => "SendMessage", Write;
        to_set_queue_attributes => "SetQueueAttributes", Write;
        to_start_message_move_task => "StartMessageMoveTask", Write;
        to_tag_queue => "TagQueue", Tagging;
        to_untag_queue => "UntagQueue", Tagging;
    }
    resources {
        on_queue(queue_name => "QueueName") => "arn:${Partition}:sqs:${Region}:${Account}:${QueueName}";
    }
    conditions {}
}
